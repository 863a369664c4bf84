//! Authenticated Vault session.

use crate::auth::AuthStrategy;
use crate::config::Config;
use crate::error::{VaultError, VaultResult};
use crate::http::{ErrorCallback, HttpExecutor, HttpResult};
use crate::types::{Namespace, Path, Token};
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

/// A configuration bound to the token obtained at construction.
///
/// The token never changes; build a new client to re-authenticate.
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
    executor: HttpExecutor,
    token: Token,
}

impl Client {
    /// Log in with `strategy` and keep the resulting token.
    ///
    /// # Errors
    ///
    /// Returns whatever error the strategy's login produced.
    pub fn new<A>(config: Config, strategy: &A) -> VaultResult<Self>
    where
        A: AuthStrategy + ?Sized,
    {
        let executor = HttpExecutor::new(&config);
        Self::login(config, executor, strategy)
    }

    /// Like [`Client::new`], with a callback receiving every transport
    /// failure reason, including one raised during login.
    ///
    /// # Errors
    ///
    /// Returns whatever error the strategy's login produced.
    pub fn with_error_callback<A, F>(config: Config, strategy: &A, on_error: F) -> VaultResult<Self>
    where
        A: AuthStrategy + ?Sized,
        F: Fn(&str) + Send + Sync + 'static,
    {
        let callback: ErrorCallback = Arc::new(on_error);
        let executor = HttpExecutor::with_error_callback(&config, callback);
        Self::login(config, executor, strategy)
    }

    #[instrument(skip_all, fields(host = config.host(), namespace = %config.namespace()))]
    fn login<A>(config: Config, executor: HttpExecutor, strategy: &A) -> VaultResult<Self>
    where
        A: AuthStrategy + ?Sized,
    {
        let token = strategy.login(&config, &executor)?;
        debug!("Vault client ready");
        Ok(Self {
            config,
            executor,
            token,
        })
    }

    /// Executor used for every request.
    #[must_use]
    pub const fn executor(&self) -> &HttpExecutor {
        &self.executor
    }

    /// Token resolved at construction.
    #[must_use]
    pub const fn token(&self) -> &Token {
        &self.token
    }

    /// Namespace from the configuration.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        self.config.namespace()
    }

    /// Configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// API URL for `path` on this client's server.
    ///
    /// # Errors
    ///
    /// See [`Config::url`].
    pub fn url(&self, path: &Path) -> VaultResult<Url> {
        self.config.url(path)
    }

    pub(crate) fn get_body(&self, path: &Path) -> VaultResult<String> {
        let url = self.url(path)?;
        into_body(self.executor.get(&url, &self.token, self.namespace()))
    }

    pub(crate) fn get_url_body(&self, url: &Url) -> VaultResult<String> {
        into_body(self.executor.get(url, &self.token, self.namespace()))
    }

    pub(crate) fn post_body(&self, path: &Path, body: String) -> VaultResult<String> {
        let url = self.url(path)?;
        into_body(self.executor.post(&url, &self.token, self.namespace(), body))
    }

    pub(crate) fn delete_body(&self, path: &Path) -> VaultResult<String> {
        let url = self.url(path)?;
        into_body(self.executor.del(&url, &self.token, self.namespace()))
    }

    pub(crate) fn list_body(&self, path: &Path) -> VaultResult<String> {
        let url = self.url(path)?;
        into_body(self.executor.list(&url, &self.token, self.namespace()))
    }
}

/// Turn an exchange outcome into the body of a 2xx response.
///
/// Used by the feature façades, which accept any 2xx status since Vault
/// answers many writes with 204.
pub(crate) fn into_body(result: HttpResult) -> VaultResult<String> {
    let response = result?;
    if response.is_2xx() {
        Ok(response.body)
    } else {
        Err(VaultError::Api {
            status: response.status_code,
            body: response.body,
        })
    }
}
