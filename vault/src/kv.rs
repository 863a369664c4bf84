//! Key/value secrets engine, versions 1 and 2.
//!
//! Every method returns the raw response body; decoding it is up to the
//! caller.

use crate::client::Client;
use crate::error::{VaultError, VaultResult};
use crate::types::{Parameters, Path};
use serde_json::json;
use tracing::{debug, instrument};

const DEFAULT_MOUNT: &str = "secret";

/// Engine version of the mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KvVersion {
    /// Unversioned key/value store
    V1,
    /// Versioned key/value store with `data/` and `metadata/` endpoints
    #[default]
    V2,
}

/// Key/value façade over one mount.
#[derive(Debug, Clone)]
pub struct KeyValue<'a> {
    client: &'a Client,
    mount: Path,
    version: KvVersion,
}

impl<'a> KeyValue<'a> {
    /// Version 2 engine mounted at `secret`.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            mount: Path::literal(DEFAULT_MOUNT),
            version: KvVersion::V2,
        }
    }

    /// Use a different mount.
    #[must_use]
    pub fn with_mount(mut self, mount: Path) -> Self {
        self.mount = mount;
        self
    }

    /// Use a different engine version.
    #[must_use]
    pub const fn with_version(mut self, version: KvVersion) -> Self {
        self.version = version;
        self
    }

    /// `mount/<section>/path` for V2, `mount/path` for V1.
    fn location(&self, section: &str, path: &Path) -> VaultResult<Path> {
        match self.version {
            KvVersion::V1 => Ok(self.mount.join(path)),
            KvVersion::V2 => Ok(self.mount.child(section)?.join(path)),
        }
    }

    fn require_v2(&self, operation: &str) -> VaultResult<()> {
        match self.version {
            KvVersion::V2 => Ok(()),
            KvVersion::V1 => Err(VaultError::invalid_input(format!(
                "{operation} requires a version 2 key/value mount"
            ))),
        }
    }

    fn write_body(&self, params: &Parameters) -> VaultResult<String> {
        match self.version {
            KvVersion::V1 => params.to_json(),
            KvVersion::V2 => Ok(serde_json::to_string(&json!({ "data": params }))?),
        }
    }

    /// List keys below `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn list(&self, path: &Path) -> VaultResult<String> {
        self.client.list_body(&self.location("metadata", path)?)
    }

    /// Read the latest version of a secret.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn read(&self, path: &Path) -> VaultResult<String> {
        debug!("Reading secret");
        self.client.get_body(&self.location("data", path)?)
    }

    /// Read a specific version of a secret.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidInput`] on a version 1 mount, otherwise
    /// a [`VaultError`] on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn read_version(&self, path: &Path, version: u64) -> VaultResult<String> {
        self.require_v2("reading a version")?;
        let mut url = self.client.url(&self.location("data", path)?)?;
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());
        self.client.get_url_body(&url)
    }

    /// Write a new secret.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn create(&self, path: &Path, params: &Parameters) -> VaultResult<String> {
        let body = self.write_body(params)?;
        self.client.post_body(&self.location("data", path)?, body)
    }

    /// Overwrite an existing secret. V2 keeps the previous version.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    pub fn update(&self, path: &Path, params: &Parameters) -> VaultResult<String> {
        self.create(path, params)
    }

    /// Delete a secret. V2 soft-deletes the latest version.
    ///
    /// # Errors
    ///
    /// Returns a [`VaultError`] on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn del(&self, path: &Path) -> VaultResult<String> {
        self.client.delete_body(&self.location("data", path)?)
    }

    /// Permanently remove the given versions of a secret.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidInput`] on a version 1 mount, otherwise
    /// a [`VaultError`] on transport failure or non-2xx status.
    #[instrument(skip_all, fields(path = %path))]
    pub fn destroy(&self, path: &Path, versions: &[u64]) -> VaultResult<String> {
        self.require_v2("destroying versions")?;
        let body = serde_json::to_string(&json!({ "versions": versions }))?;
        self.client.post_body(&self.location("destroy", path)?, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenStrategy;
    use crate::config::Config;
    use crate::types::Token;

    fn client() -> Client {
        let strategy = TokenStrategy::new(Token::new("s.root")).unwrap();
        Client::new(Config::builder().build().unwrap(), &strategy).unwrap()
    }

    #[test]
    fn test_default_mount_is_secret_v2() {
        let client = client();
        let kv = KeyValue::new(&client);
        let path = Path::new("app/db").unwrap();

        assert_eq!(kv.version, KvVersion::V2);
        assert_eq!(kv.location("data", &path).unwrap().to_string(), "secret/data/app/db");
        assert_eq!(
            kv.location("metadata", &path).unwrap().to_string(),
            "secret/metadata/app/db"
        );
    }

    #[test]
    fn test_v1_location_has_no_section() {
        let client = client();
        let kv = KeyValue::new(&client).with_version(KvVersion::V1);
        let path = Path::new("app").unwrap();

        assert_eq!(kv.location("data", &path).unwrap().to_string(), "secret/app");
        assert!(kv.require_v2("destroying versions").is_err());
    }
}
