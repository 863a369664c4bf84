//! Vault client configuration.

use crate::error::{VaultError, VaultResult};
use crate::types::{Namespace, Path};
use std::time::Duration;
use url::Url;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 8200;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport settings for one Vault server. Immutable once built.
#[derive(Debug, Clone)]
pub struct Config {
    host: String,
    port: u16,
    tls: bool,
    verify: bool,
    debug: bool,
    connect_timeout: Duration,
    namespace: Namespace,
    base_url: Url,
}

impl Config {
    /// Start a builder with default settings.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Server host name or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Server port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// `https` when TLS is enabled, `http` otherwise.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        if self.tls { "https" } else { "http" }
    }

    /// Whether TLS is used at all.
    #[must_use]
    pub const fn tls(&self) -> bool {
        self.tls
    }

    /// Whether the server certificate is verified.
    #[must_use]
    pub const fn verify(&self) -> bool {
        self.verify
    }

    /// Whether verbose transport logging is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Connect timeout. Zero means no explicit timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Namespace sent with every request.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// `scheme://host:port/v1/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the API URL for `path`, percent-encoding each segment.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] if the base URL cannot carry a
    /// path, which `build` already rules out.
    pub fn url(&self, path: &Path) -> VaultResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| VaultError::invalid_config("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }
}

/// Builder for [`Config`]. Unset fields keep their defaults.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    host: String,
    port: u16,
    tls: bool,
    verify: bool,
    debug: bool,
    connect_timeout: Duration,
    namespace: Namespace,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            tls: true,
            verify: true,
            debug: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            namespace: Namespace::none(),
        }
    }
}

impl ConfigBuilder {
    /// Set the server host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the server port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Use `https` (true) or plain `http` (false).
    #[must_use]
    pub const fn with_tls_enabled(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Enable or disable server certificate verification.
    #[must_use]
    pub const fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Enable verbose transport logging.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the connect timeout in whole seconds. Zero disables it.
    #[must_use]
    pub const fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout = Duration::from_secs(seconds);
        self
    }

    /// Set the namespace sent with every request.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<Namespace>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] if the host is empty or
    /// `scheme://host:port/` is not a valid URL.
    pub fn build(self) -> VaultResult<Config> {
        if self.host.trim().is_empty() {
            return Err(VaultError::invalid_config("host must not be empty"));
        }

        let scheme = if self.tls { "https" } else { "http" };
        let base_url = Url::parse(&format!("{scheme}://{}:{}/v1/", self.host, self.port))
            .map_err(|e| VaultError::invalid_config(format!("invalid host {:?}: {e}", self.host)))?;
        if base_url.cannot_be_a_base() || base_url.host_str().is_none() {
            return Err(VaultError::invalid_config(format!(
                "invalid host {:?}",
                self.host
            )));
        }

        Ok(Config {
            host: self.host,
            port: self.port,
            tls: self.tls,
            verify: self.verify,
            debug: self.debug,
            connect_timeout: self.connect_timeout,
            namespace: self.namespace,
            base_url,
        })
    }
}
