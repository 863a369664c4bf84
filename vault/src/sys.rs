//! System backend administration: policies, auth methods and mounts.

use crate::client::Client;
use crate::error::VaultResult;
use crate::types::{Parameters, Path};
use tracing::instrument;

fn sys_path(section: &str, name: &Path) -> VaultResult<Path> {
    Ok(Path::new("sys")?.child(section)?.join(name))
}

/// ACL policy administration under `sys/policy`.
#[derive(Debug, Clone, Copy)]
pub struct Policy<'a> {
    client: &'a Client,
}

impl<'a> Policy<'a> {
    /// Bind to `client`.
    #[must_use]
    pub const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List policy names.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    pub fn list(&self) -> VaultResult<String> {
        self.client.get_body(&sys_path("policy", &Path::root())?)
    }

    /// Read one policy.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    pub fn read(&self, name: &Path) -> VaultResult<String> {
        self.client.get_body(&sys_path("policy", name)?)
    }

    /// Create or replace a policy. `params` carries the `policy` document.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    #[instrument(skip_all, fields(name = %name))]
    pub fn create(&self, name: &Path, params: &Parameters) -> VaultResult<String> {
        self.client
            .post_body(&sys_path("policy", name)?, params.to_json()?)
    }

    /// Delete a policy.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    #[instrument(skip_all, fields(name = %name))]
    pub fn del(&self, name: &Path) -> VaultResult<String> {
        self.client.delete_body(&sys_path("policy", name)?)
    }
}

/// Auth method administration under `sys/auth`.
#[derive(Debug, Clone, Copy)]
pub struct Auth<'a> {
    client: &'a Client,
}

impl<'a> Auth<'a> {
    /// Bind to `client`.
    #[must_use]
    pub const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List enabled auth methods.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    pub fn list(&self) -> VaultResult<String> {
        self.client.get_body(&sys_path("auth", &Path::root())?)
    }

    /// Enable an auth method at `path`; `params` must carry its `type`.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn enable(&self, path: &Path, params: &Parameters) -> VaultResult<String> {
        self.client
            .post_body(&sys_path("auth", path)?, params.to_json()?)
    }

    /// Disable the auth method at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn disable(&self, path: &Path) -> VaultResult<String> {
        self.client.delete_body(&sys_path("auth", path)?)
    }
}

/// Secrets engine mount administration under `sys/mounts`.
#[derive(Debug, Clone, Copy)]
pub struct Mounts<'a> {
    client: &'a Client,
}

impl<'a> Mounts<'a> {
    /// Bind to `client`.
    #[must_use]
    pub const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List mounted engines.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    pub fn list(&self) -> VaultResult<String> {
        self.client.get_body(&sys_path("mounts", &Path::root())?)
    }

    /// Read the tuning of the mount at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    pub fn read(&self, path: &Path) -> VaultResult<String> {
        self.client
            .get_body(&sys_path("mounts", path)?.child("tune")?)
    }

    /// Mount an engine at `path`; `params` must carry its `type`.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn enable(&self, path: &Path, params: &Parameters) -> VaultResult<String> {
        self.client
            .post_body(&sys_path("mounts", path)?, params.to_json()?)
    }

    /// Unmount the engine at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`](crate::VaultError) on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn disable(&self, path: &Path) -> VaultResult<String> {
        self.client.delete_body(&sys_path("mounts", path)?)
    }
}
