//! Per-request transport session.
//!
//! Every exchange gets its own blocking reqwest client. The client is
//! dropped when the call returns, so no connection state outlives or is
//! shared between calls.

use crate::config::Config;
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;

const USER_AGENT: &str = concat!("vault-client-rust/", env!("CARGO_PKG_VERSION"));

/// Transport settings copied out of [`Config`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Verify the server certificate chain and host name
    pub verify: bool,
    /// Log connection reads and writes
    pub verbose: bool,
    /// Connect timeout; zero leaves the transport default in place
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            verify: true,
            verbose: false,
            connect_timeout: Duration::from_secs(10),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl From<&Config> for TransportConfig {
    fn from(config: &Config) -> Self {
        Self {
            verify: config.verify(),
            verbose: config.debug(),
            connect_timeout: config.connect_timeout(),
            ..Self::default()
        }
    }
}

/// Build the client for a single exchange.
///
/// Pooling is disabled and rustls is used for TLS.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g., TLS initialization fails).
pub fn build_session(config: &TransportConfig) -> Result<Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .pool_max_idle_per_host(0)
        .user_agent(&config.user_agent)
        .danger_accept_invalid_certs(!config.verify)
        .connection_verbose(config.verbose)
        .use_rustls_tls();

    if !config.connect_timeout.is_zero() {
        builder = builder.connect_timeout(config.connect_timeout);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert!(config.verify);
        assert!(!config.verbose);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("vault-client-rust/"));
    }

    #[test]
    fn test_from_vault_config() {
        let vault = Config::builder()
            .with_tls_verification(false)
            .with_debug(true)
            .with_connect_timeout(3)
            .build()
            .unwrap();
        let config = TransportConfig::from(&vault);
        assert!(!config.verify);
        assert!(config.verbose);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_build_session() {
        assert!(build_session(&TransportConfig::default()).is_ok());

        let insecure = TransportConfig {
            verify: false,
            connect_timeout: Duration::ZERO,
            ..TransportConfig::default()
        };
        assert!(build_session(&insecure).is_ok());
    }
}
