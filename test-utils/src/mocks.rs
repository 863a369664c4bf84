//! Mock Vault server and error-callback capture.
//!
//! The vault client is blocking, so tests drive it from a plain thread and
//! only use the tokio runtime owned by [`MockVault`] to talk to wiremock.
//! The wiremock server itself runs on its own background thread.

// Test harness: setup failures should panic.
#![allow(clippy::expect_used)]

use std::net::TcpListener;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Runtime;
use vault_client::{Config, ConfigBuilder, ErrorCallback};
use wiremock::{Mock, MockServer, Request};

/// A wiremock server standing in for Vault.
pub struct MockVault {
    // Dropped before the runtime.
    server: MockServer,
    runtime: Runtime,
}

impl MockVault {
    /// Start a fresh server.
    #[must_use]
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build mock runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    /// Register a mock.
    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Base URI, e.g. `http://127.0.0.1:41234`.
    #[must_use]
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Builder pointed at this server over plain HTTP.
    #[must_use]
    pub fn config_builder(&self) -> ConfigBuilder {
        let address = self.server.address();
        Config::builder()
            .with_host(address.ip().to_string())
            .with_port(address.port())
            .with_tls_enabled(false)
            .with_connect_timeout(2)
    }

    /// Config pointed at this server over plain HTTP.
    #[must_use]
    pub fn config(&self) -> Config {
        self.config_builder()
            .build()
            .expect("mock server address is a valid host")
    }

    /// Every request the server has seen, in arrival order.
    #[must_use]
    pub fn received_requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    /// Panic if any mounted expectation was not met.
    pub fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }
}

/// A local port with nothing listening on it.
#[must_use]
pub fn unused_local_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind ephemeral port");
    listener
        .local_addr()
        .expect("bound listener has an address")
        .port()
}

/// Records every message handed to an error callback.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    messages: Arc<Mutex<Vec<String>>>,
}

impl ErrorLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message.
    pub fn record(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    /// Callback for [`vault_client::HttpExecutor::with_error_callback`].
    #[must_use]
    pub fn callback(&self) -> ErrorCallback {
        let log = self.clone();
        Arc::new(move |message: &str| log.record(message))
    }

    /// Closure for [`vault_client::Client::with_error_callback`].
    #[must_use]
    pub fn recorder(&self) -> impl Fn(&str) + Send + Sync + 'static {
        let log = self.clone();
        move |message: &str| log.record(message)
    }

    /// Messages recorded so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of messages recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_log_records_through_callback() {
        let log = ErrorLog::new();
        let callback = log.callback();
        callback("first");
        (log.recorder())("second");

        assert_eq!(log.count(), 2);
        assert_eq!(log.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_mock_vault_config_points_at_server() {
        let vault = MockVault::start();
        let config = vault.config();
        assert_eq!(config.scheme(), "http");
        assert!(vault.uri().ends_with(&format!(":{}", config.port())));
        assert!(vault.received_requests().is_empty());
    }

    #[test]
    fn test_unused_local_port_is_nonzero() {
        assert_ne!(unused_local_port(), 0);
    }
}
