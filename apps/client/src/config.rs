use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration loaded from environment variables.
/// Every key has a default, so an empty environment yields a local-dev setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the parsing/matching service, without a trailing slash.
    pub api_url: String,
    /// Upper bound on any single backend call.
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("RESUME_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            anyhow::bail!("RESUME_API_URL must be an http(s) URL, got '{api_url}'");
        }

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rust_log: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = load(&[("RESUME_API_URL", "https://parser.example.com/")]).unwrap();
        assert_eq!(config.api_url, "https://parser.example.com");
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(load(&[("RESUME_API_URL", "ftp://parser")]).is_err());
    }

    #[test]
    fn test_timeout_parsed() {
        let config = load(&[("REQUEST_TIMEOUT_SECS", "15")]).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_rejects_bad_timeout() {
        assert!(load(&[("REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("REQUEST_TIMEOUT_SECS", "0")]).is_err());
    }
}
