//! Environment-driven settings for retell-gateway.
//!
//! [`Config::load`] reads an optional `.env` file and then the process
//! environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `RETELL_API_KEY` | required |
//! | `RETELL_BASE_URL` | `https://api.retellai.com` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `LOG_LEVEL` | `info` |
//! | `API_TIMEOUT` | `30000` (milliseconds) |
//! | `API_RETRY_ATTEMPTS` | `3` |
//!
//! # Example
//!
//! ```rust
//! use retell_config::Config;
//!
//! let config = Config::from_lookup(|key| match key {
//!     "RETELL_API_KEY" => Some("key_123".to_string()),
//!     "PORT" => Some("8080".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.bind_addr(), "0.0.0.0:8080");
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.retellai.com";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Errors that can occur when loading settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Service settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer token sent to the Retell API.
    pub api_key: String,
    /// Retell API base URL without a trailing slash.
    pub base_url: String,
    pub host: String,
    pub port: u16,
    /// Tracing filter directive.
    pub log_level: String,
    /// Per-request upstream timeout.
    pub api_timeout: Duration,
    /// Total attempts for transient upstream failures, at least 1.
    pub retry_attempts: u32,
}

// Keeps the API key out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("api_timeout", &self.api_timeout)
            .field("retry_attempts", &self.retry_attempts)
            .finish()
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("RETELL_API_KEY").ok_or(ConfigError::MissingVar("RETELL_API_KEY"))?;

        let base_url = get("RETELL_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_ms: u64 = parse_or(get("API_TIMEOUT"), "API_TIMEOUT", DEFAULT_TIMEOUT_MS)?;
        let retry_attempts: u32 =
            parse_or(get("API_RETRY_ATTEMPTS"), "API_RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS)?;

        Ok(Self {
            api_key,
            base_url,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            api_timeout: Duration::from_millis(timeout_ms),
            retry_attempts: retry_attempts.max(1),
        })
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup(&[("RETELL_API_KEY", "key_abc")])).unwrap();

        assert_eq!(config.api_key, "key_abc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.api_timeout, Duration::from_secs(30));
        assert_eq!(config.retry_attempts, 3);
    }

    #[rstest]
    #[case(&[])]
    #[case(&[("RETELL_API_KEY", "")])]
    #[case(&[("RETELL_API_KEY", "   ")])]
    fn missing_api_key_is_rejected(#[case] pairs: &[(&str, &str)]) {
        let err = Config::from_lookup(lookup(pairs)).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("RETELL_API_KEY"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("RETELL_API_KEY", "key_abc"),
            ("RETELL_BASE_URL", "http://localhost:9999/"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOG_LEVEL", "debug"),
            ("API_TIMEOUT", "1500"),
            ("API_RETRY_ATTEMPTS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api_timeout, Duration::from_millis(1500));
        assert_eq!(config.retry_attempts, 5);
    }

    #[rstest]
    #[case("PORT", "eighty")]
    #[case("PORT", "70000")]
    #[case("API_TIMEOUT", "-1")]
    #[case("API_RETRY_ATTEMPTS", "many")]
    fn unparsable_values_are_rejected(#[case] var: &'static str, #[case] value: &str) {
        let err = Config::from_lookup(lookup(&[("RETELL_API_KEY", "k"), (var, value)])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid { var, value: value.to_string() });
    }

    #[test]
    fn zero_retry_attempts_still_tries_once() {
        let config = Config::from_lookup(lookup(&[
            ("RETELL_API_KEY", "k"),
            ("API_RETRY_ATTEMPTS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.retry_attempts, 1);
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = Config::from_lookup(lookup(&[("RETELL_API_KEY", "secret_key")])).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret_key"));
        assert!(debug.contains("<redacted>"));
    }
}
