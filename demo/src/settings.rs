//! Demo settings loaded from the environment.

use anyhow::{Context, Result, bail};
use std::env;
use std::str::FromStr;
use vault_client::{Config, Token};

/// Settings for one demo run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root token used for setup and cleanup
    pub root_token: Token,
    /// Vault host
    pub host: String,
    /// Vault port
    pub port: u16,
    /// Log filter directives used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON logs
    pub json_logs: bool,
}

impl Settings {
    /// Load settings from the process environment and an optional `.env` file.
    ///
    /// # Errors
    ///
    /// Fails when `VAULT_ROOT_TOKEN` is missing or a numeric variable does
    /// not parse.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Same as [`Settings::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let root_token = match lookup("VAULT_ROOT_TOKEN") {
            Some(token) if !token.is_empty() => Token::new(token),
            _ => bail!("VAULT_ROOT_TOKEN must be set"),
        };

        Ok(Self {
            root_token,
            host: lookup("VAULT_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_var(&lookup, "VAULT_PORT", 8200)?,
            log_level: lookup("VAULT_DEMO_LOG").unwrap_or_else(|| "info".to_string()),
            json_logs: parse_var(&lookup, "VAULT_DEMO_JSON_LOGS", false)?,
        })
    }

    /// Client configuration for a plaintext dev server.
    ///
    /// # Errors
    ///
    /// Fails when the host is rejected by [`Config`].
    pub fn vault_config(&self) -> Result<Config> {
        Config::builder()
            .with_host(self.host.as_str())
            .with_port(self.port)
            .with_tls_enabled(false)
            .build()
            .context("invalid Vault configuration")
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.parse()
            .with_context(|| format!("{key} has an invalid value: {raw}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[("VAULT_ROOT_TOKEN", "root")])).unwrap();

        assert_eq!(settings.root_token.expose(), "root");
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 8200);
        assert_eq!(settings.log_level, "info");
        assert!(!settings.json_logs);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("VAULT_ROOT_TOKEN", "root"),
            ("VAULT_HOST", "vault.internal"),
            ("VAULT_PORT", "8300"),
            ("VAULT_DEMO_LOG", "vault_client=debug"),
            ("VAULT_DEMO_JSON_LOGS", "true"),
        ]))
        .unwrap();

        assert_eq!(settings.host, "vault.internal");
        assert_eq!(settings.port, 8300);
        assert_eq!(settings.log_level, "vault_client=debug");
        assert!(settings.json_logs);

        let config = settings.vault_config().unwrap();
        assert!(!config.tls());
        assert_eq!(config.base_url().as_str(), "http://vault.internal:8300/v1/");
    }

    #[test]
    fn test_missing_token_fails() {
        assert!(Settings::from_lookup(lookup(&[])).is_err());
        assert!(Settings::from_lookup(lookup(&[("VAULT_ROOT_TOKEN", "")])).is_err());
    }

    #[test]
    fn test_bad_port_fails() {
        let result = Settings::from_lookup(lookup(&[
            ("VAULT_ROOT_TOKEN", "root"),
            ("VAULT_PORT", "not-a-port"),
        ]));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("VAULT_PORT"));
    }
}
