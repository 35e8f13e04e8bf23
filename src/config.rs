use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use zeroize::Zeroize;

pub const FACT_CHECK_API_KEY: &str = "FACT_CHECK_API_KEY";
pub const NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const FACT_CHECK_ENDPOINT: &str = "FACT_CHECK_ENDPOINT";
pub const NEWS_API_ENDPOINT: &str = "NEWS_API_ENDPOINT";
pub const MODEL_DIR: &str = "VERDICT_MODEL_DIR";
pub const HTTP_TIMEOUT_SECS: &str = "VERDICT_HTTP_TIMEOUT_SECS";

pub const DEFAULT_FACT_CHECK_ENDPOINT: &str =
    "https://factchecktools.googleapis.com/v1alpha1/claims:search";
pub const DEFAULT_NEWS_API_ENDPOINT: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_MODEL_DIR: &str = "models";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidEndpoint {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Credential for an outbound service. Redacted in `Debug`, wiped on drop.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Blank values and `...` placeholders are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.contains("...") {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub fact_check_key: Option<ApiKey>,
    pub news_api_key: Option<ApiKey>,
    pub fact_check_endpoint: Url,
    pub news_api_endpoint: Url,
    pub model_dir: PathBuf,
    pub http_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = |var: &'static str, default: &str| {
            let raw = lookup(var).unwrap_or_else(|| default.to_string());
            Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidEndpoint { var, source })
        };

        let http_timeout = match lookup(HTTP_TIMEOUT_SECS) {
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: HTTP_TIMEOUT_SECS,
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            fact_check_key: lookup(FACT_CHECK_API_KEY).and_then(|k| ApiKey::parse(&k)),
            news_api_key: lookup(NEWS_API_KEY).and_then(|k| ApiKey::parse(&k)),
            fact_check_endpoint: endpoint(FACT_CHECK_ENDPOINT, DEFAULT_FACT_CHECK_ENDPOINT)?,
            news_api_endpoint: endpoint(NEWS_API_ENDPOINT, DEFAULT_NEWS_API_ENDPOINT)?,
            model_dir: lookup(MODEL_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR)),
            http_timeout,
        })
    }
}
