//! Authentication strategies.
//!
//! A strategy turns a [`Config`] and an [`HttpExecutor`] into a session
//! [`Token`]. The strategy is picked when the [`Client`](crate::Client) is
//! built and never changes afterwards.

use crate::config::Config;
use crate::error::{VaultError, VaultResult};
use crate::http::HttpExecutor;
use crate::types::{Namespace, Path, RoleId, SecretId, Token};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Produces a session token.
pub trait AuthStrategy {
    /// Obtain a token for `config`, using `executor` for any exchange.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Authentication`] when no token can be obtained.
    fn login(&self, config: &Config, executor: &HttpExecutor) -> VaultResult<Token>;
}

/// Uses a token issued out of band. Never contacts the server.
#[derive(Debug, Clone)]
pub struct TokenStrategy {
    token: Token,
}

impl TokenStrategy {
    /// Wrap a pre-issued token.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidInput`] for the empty token.
    pub fn new(token: Token) -> VaultResult<Self> {
        if token.is_empty() {
            return Err(VaultError::invalid_input("token must not be empty"));
        }
        Ok(Self { token })
    }
}

impl AuthStrategy for TokenStrategy {
    fn login(&self, _config: &Config, _executor: &HttpExecutor) -> VaultResult<Token> {
        Ok(self.token.clone())
    }
}

/// Logs in through the AppRole auth method.
#[derive(Debug, Clone)]
pub struct AppRoleStrategy {
    role_id: RoleId,
    secret_id: SecretId,
}

#[derive(Serialize)]
struct AppRoleLogin<'a> {
    role_id: &'a str,
    secret_id: &'a str,
}

/// Vault login response. Only the token is read.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    auth: Option<LoginAuth>,
}

#[derive(Debug, Deserialize)]
struct LoginAuth {
    client_token: Option<String>,
}

impl AppRoleStrategy {
    /// Create a strategy for the given role and secret ids.
    #[must_use]
    pub const fn new(role_id: RoleId, secret_id: SecretId) -> Self {
        Self { role_id, secret_id }
    }

    /// Path of the login endpoint below `/v1/`.
    fn login_path() -> VaultResult<Path> {
        Path::new("auth/approle/login")
    }
}

impl AuthStrategy for AppRoleStrategy {
    #[instrument(skip_all, fields(role_id = %self.role_id.as_str()))]
    fn login(&self, config: &Config, executor: &HttpExecutor) -> VaultResult<Token> {
        let url = config.url(&Self::login_path()?)?;
        let body = serde_json::to_string(&AppRoleLogin {
            role_id: self.role_id.as_str(),
            secret_id: self.secret_id.expose(),
        })?;

        let response = executor
            .post(&url, &Token::empty(), &Namespace::none(), body)
            .map_err(|e| VaultError::auth_failed(format!("login request failed: {e}")))?;

        if !response.is_success() {
            return Err(VaultError::auth_failed(format!(
                "Status {}: {}",
                response.status_code, response.body
            )));
        }

        let token = parse_client_token(&response.body)?;
        info!("Authenticated with AppRole");
        Ok(token)
    }
}

/// Extract `auth.client_token` from a login response body.
fn parse_client_token(body: &str) -> VaultResult<Token> {
    let parsed: LoginResponse = serde_json::from_str(body)
        .map_err(|e| VaultError::auth_failed(format!("malformed login response: {e}")))?;

    parsed
        .auth
        .and_then(|auth| auth.client_token)
        .filter(|token| !token.is_empty())
        .map(Token::new)
        .ok_or_else(|| VaultError::auth_failed("login response has no auth.client_token"))
}
