//! Blocking HTTP executor for Vault API requests.
//!
//! One call is one exchange: headers are built, a transport session is
//! opened, the request is sent once and the session is released. The
//! executor never interprets status codes.

pub mod transport;

use crate::config::Config;
use crate::error::TransportError;
use crate::types::{Namespace, Token};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use transport::{TransportConfig, build_session};
use url::Url;

/// Header carrying the session token.
pub const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";
/// Header carrying the tenant namespace.
pub const VAULT_NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Receives a human-readable reason whenever an exchange fails to complete.
pub type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Outcome of one exchange.
pub type HttpResult = Result<HttpResponse, TransportError>;

/// A completed exchange, whatever its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// True for status 200.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// True for any 2xx status.
    #[must_use]
    pub const fn is_2xx(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }
}

/// True iff the exchange completed with status 200.
#[must_use]
pub fn is_success(result: &HttpResult) -> bool {
    result.as_ref().is_ok_and(HttpResponse::is_success)
}

/// HTTP verbs understood by Vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST with a JSON body
    Post,
    /// DELETE
    Delete,
    /// Non-standard LIST, a GET that enumerates children
    List,
}

impl HttpMethod {
    /// Verb as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::List => "LIST",
        }
    }

    fn to_reqwest(self) -> Result<Method, TransportError> {
        match self {
            Self::Get => Ok(Method::GET),
            Self::Post => Ok(Method::POST),
            Self::Delete => Ok(Method::DELETE),
            Self::List => Method::from_bytes(b"LIST")
                .map_err(|e| TransportError::InvalidRequest(e.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Executes authenticated requests against a Vault server.
#[derive(Clone)]
pub struct HttpExecutor {
    transport: TransportConfig,
    on_error: ErrorCallback,
}

impl fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl HttpExecutor {
    /// Create an executor that reports transport failures only through
    /// its return values.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_error_callback(config, Arc::new(|_: &str| {}))
    }

    /// Create an executor that also hands every transport failure reason
    /// to `on_error`.
    #[must_use]
    pub fn with_error_callback(config: &Config, on_error: ErrorCallback) -> Self {
        let transport = TransportConfig::from(config);
        if !transport.verify {
            warn!(
                host = config.host(),
                "TLS certificate verification is disabled"
            );
        }
        Self {
            transport,
            on_error,
        }
    }

    /// Whether server certificates are verified.
    #[must_use]
    pub const fn verifies_tls(&self) -> bool {
        self.transport.verify
    }

    /// Issue a GET.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was received.
    pub fn get(&self, url: &Url, token: &Token, namespace: &Namespace) -> HttpResult {
        self.execute(HttpMethod::Get, url, token, namespace, None)
    }

    /// Issue a POST with a JSON `body`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was received.
    pub fn post(
        &self,
        url: &Url,
        token: &Token,
        namespace: &Namespace,
        body: impl Into<String>,
    ) -> HttpResult {
        self.execute(HttpMethod::Post, url, token, namespace, Some(body.into()))
    }

    /// Issue a DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was received.
    pub fn del(&self, url: &Url, token: &Token, namespace: &Namespace) -> HttpResult {
        self.execute(HttpMethod::Delete, url, token, namespace, None)
    }

    /// Issue a LIST.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was received.
    pub fn list(&self, url: &Url, token: &Token, namespace: &Namespace) -> HttpResult {
        self.execute(HttpMethod::List, url, token, namespace, None)
    }

    /// Issue one request with any verb.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was received. The error
    /// callback has been invoked exactly once in that case.
    #[instrument(
        skip_all,
        fields(method = %method, url = %url, verify_tls = self.transport.verify)
    )]
    pub fn execute(
        &self,
        method: HttpMethod,
        url: &Url,
        token: &Token,
        namespace: &Namespace,
        body: Option<String>,
    ) -> HttpResult {
        let result = self.exchange(method, url, token, namespace, body);

        match &result {
            Ok(response) => {
                if self.transport.verbose {
                    debug!(
                        status = response.status_code,
                        bytes = response.body.len(),
                        "Vault exchange completed"
                    );
                }
            }
            Err(err) => {
                warn!(error = %err, "Vault exchange failed");
                (self.on_error)(&err.to_string());
            }
        }

        result
    }

    fn exchange(
        &self,
        method: HttpMethod,
        url: &Url,
        token: &Token,
        namespace: &Namespace,
        body: Option<String>,
    ) -> HttpResult {
        let headers = request_headers(token, namespace)?;
        let session = build_session(&self.transport)?;

        let mut request = session
            .request(method.to_reqwest()?, url.clone())
            .headers(headers);
        if let Some(body) = body {
            if self.transport.verbose {
                debug!(bytes = body.len(), "Sending request body");
            }
            request = request.body(body);
        }

        let response = request.send()?;
        let status_code = response.status().as_u16();
        let bytes = response.bytes()?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|e| {
            TransportError::InvalidBody(format!("status {status_code}: {e}"))
        })?;

        Ok(HttpResponse { status_code, body })
    }
}

/// Build the header set for one request.
///
/// `Content-Type` is always present; the token and namespace headers only
/// when their values are non-empty.
///
/// # Errors
///
/// Returns [`TransportError::InvalidRequest`] if a value is not a legal
/// header value.
pub fn request_headers(token: &Token, namespace: &Namespace) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if !token.is_empty() {
        let mut value = HeaderValue::from_str(token.expose()).map_err(|_| {
            TransportError::InvalidRequest("token is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-vault-token"), value);
    }

    if !namespace.is_empty() {
        let value = HeaderValue::from_str(namespace.as_str()).map_err(|_| {
            TransportError::InvalidRequest(format!(
                "namespace {namespace:?} is not a valid header value"
            ))
        })?;
        headers.insert(HeaderName::from_static("x-vault-namespace"), value);
    }

    Ok(headers)
}
