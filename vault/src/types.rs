//! Value types shared by the executor, auth strategies and façades.

use crate::error::{VaultError, VaultResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Session token sent as `X-Vault-Token`.
///
/// The empty token is the unauthenticated state: no header is sent for it.
/// `Debug` output never contains the token value.
#[derive(Clone)]
pub struct Token(SecretString);

impl Token {
    /// Wrap a token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// The unauthenticated token.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// True for the unauthenticated token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }

    /// Borrow the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Token(<empty>)")
        } else {
            f.write_str("Token([REDACTED])")
        }
    }
}

/// Tenant namespace sent as `X-Vault-Namespace`. Empty means no header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Wrap a namespace name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// No namespace.
    #[must_use]
    pub const fn none() -> Self {
        Self(String::new())
    }

    /// True when no header should be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Namespace as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Namespace {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Namespace {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Logical resource path below `/v1/`, e.g. `secret/data/app`.
///
/// Stored as `/`-separated segments with empty segments removed. Control
/// characters and `.`/`..` segments are rejected; every other character is
/// percent-encoded when the path is turned into a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Parse a path.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidInput`] if the path contains a control
    /// character or a `.` or `..` segment.
    pub fn new(value: impl AsRef<str>) -> VaultResult<Self> {
        let value = value.as_ref();
        if let Some(c) = value.chars().find(|c| c.is_control()) {
            return Err(VaultError::invalid_input(format!(
                "path contains control character {c:?}"
            )));
        }

        let segments: Vec<String> = value
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        // URL normalization would silently resolve these to another resource.
        if let Some(dot) = segments.iter().find(|s| *s == "." || *s == "..") {
            return Err(VaultError::invalid_input(format!(
                "path {value:?} contains a {dot:?} segment"
            )));
        }

        Ok(Self { segments })
    }

    /// Single-segment path from a literal known to be valid.
    #[must_use]
    pub(crate) fn literal(segment: &'static str) -> Self {
        debug_assert!(Self::new(segment).is_ok_and(|p| p.segments == [segment]));
        Self {
            segments: vec![segment.to_string()],
        }
    }

    /// The empty path.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Append `other` below this path.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Append a single literal segment such as `data` or `role-id`.
    ///
    /// # Errors
    ///
    /// Same as [`Path::new`].
    pub fn child(&self, segment: &str) -> VaultResult<Self> {
        Ok(self.join(&Self::new(segment)?))
    }

    /// Path segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True for the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Request parameters serialized as a flat JSON object.
///
/// Inserting a key that already exists replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, String>);

impl Parameters {
    /// Empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder form of [`Parameters::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate key/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as a JSON object body.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> VaultResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Parameters {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// AppRole role identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleId(String);

impl RoleId {
    /// Wrap a role id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Role id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// AppRole secret identifier.
#[derive(Clone)]
pub struct SecretId(SecretString);

impl SecretId {
    /// Wrap a secret id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Borrow the raw secret id.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SecretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretId([REDACTED])")
    }
}
