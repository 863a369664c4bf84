//! Blocking HashiCorp Vault client.
//!
//! The core is an [`HttpExecutor`] that performs one authenticated exchange
//! per call, and an [`AuthStrategy`] that produces the session [`Token`]
//! a [`Client`] keeps for its lifetime. The [`kv`], [`sys`] and [`approle`]
//! modules are thin façades that build API paths on top of that core.
//!
//! ```no_run
//! use vault_client::{Client, Config, KeyValue, Parameters, Path, Token, TokenStrategy};
//!
//! # fn main() -> vault_client::VaultResult<()> {
//! let config = Config::builder().with_tls_enabled(false).build()?;
//! let client = Client::new(config, &TokenStrategy::new(Token::new("root"))?)?;
//!
//! let kv = KeyValue::new(&client);
//! kv.create(&Path::new("hello")?, &Parameters::from([("foo", "world")]))?;
//! println!("{}", kv.read(&Path::new("hello")?)?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod approle;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod kv;
pub mod sys;
pub mod types;

pub use approle::AppRole;
pub use auth::{AppRoleStrategy, AuthStrategy, TokenStrategy};
pub use client::Client;
pub use config::{Config, ConfigBuilder};
pub use error::{TransportError, VaultError, VaultResult};
pub use http::{ErrorCallback, HttpExecutor, HttpMethod, HttpResponse, HttpResult, is_success};
pub use kv::{KeyValue, KvVersion};
pub use types::{Namespace, Parameters, Path, RoleId, SecretId, Token};
pub use url::Url;
