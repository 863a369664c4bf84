//! AppRole role administration under `auth/approle/role`.

use crate::client::Client;
use crate::error::{VaultError, VaultResult};
use crate::types::{Parameters, Path, RoleId, SecretId};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct RoleIdData {
    role_id: String,
}

#[derive(Debug, Deserialize)]
struct SecretIdData {
    secret_id: String,
}

/// AppRole administration façade.
#[derive(Debug, Clone, Copy)]
pub struct AppRole<'a> {
    client: &'a Client,
}

impl<'a> AppRole<'a> {
    /// Bind to `client`.
    #[must_use]
    pub const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn role_path(role: &Path) -> VaultResult<Path> {
        Ok(Path::new("auth/approle/role")?.join(role))
    }

    /// List role names.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    pub fn list(&self) -> VaultResult<String> {
        self.client.list_body(&Self::role_path(&Path::root())?)
    }

    /// Create or update a role.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    #[instrument(skip_all, fields(role = %role))]
    pub fn create(&self, role: &Path, params: &Parameters) -> VaultResult<String> {
        self.client
            .post_body(&Self::role_path(role)?, params.to_json()?)
    }

    /// Read a role.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    pub fn read(&self, role: &Path) -> VaultResult<String> {
        self.client.get_body(&Self::role_path(role)?)
    }

    /// Delete a role.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    #[instrument(skip_all, fields(role = %role))]
    pub fn del(&self, role: &Path) -> VaultResult<String> {
        self.client.delete_body(&Self::role_path(role)?)
    }

    /// Raw `role-id` response for a role.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    pub fn get_role_id(&self, role: &Path) -> VaultResult<String> {
        self.client
            .get_body(&Self::role_path(role)?.child("role-id")?)
    }

    /// Generate a new secret id; raw response.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    #[instrument(skip_all, fields(role = %role))]
    pub fn generate_secret_id(&self, role: &Path, params: &Parameters) -> VaultResult<String> {
        self.client
            .post_body(&Self::role_path(role)?.child("secret-id")?, params.to_json()?)
    }

    /// Role id of `role`, decoded from `data.role_id`.
    ///
    /// # Errors
    ///
    /// As [`AppRole::get_role_id`], plus [`VaultError::Serialization`] when
    /// the field is missing.
    pub fn role_id(&self, role: &Path) -> VaultResult<RoleId> {
        let body = self.get_role_id(role)?;
        let parsed: DataEnvelope<RoleIdData> = serde_json::from_str(&body)?;
        Ok(RoleId::new(parsed.data.role_id))
    }

    /// Fresh secret id for `role`, decoded from `data.secret_id`.
    ///
    /// # Errors
    ///
    /// As [`AppRole::generate_secret_id`], plus
    /// [`VaultError::Serialization`] when the field is missing.
    pub fn secret_id(&self, role: &Path, params: &Parameters) -> VaultResult<SecretId> {
        let body = self.generate_secret_id(role, params)?;
        let parsed: DataEnvelope<SecretIdData> = serde_json::from_str(&body)?;
        if parsed.data.secret_id.is_empty() {
            return Err(VaultError::invalid_input("server returned an empty secret_id"));
        }
        Ok(SecretId::new(parsed.data.secret_id))
    }
}
