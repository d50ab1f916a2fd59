use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const ENV_BASE_URL: &str = "TUTOR_API_URL";
const ENV_CHAT_TIMEOUT: &str = "TUTOR_CHAT_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid value {value:?} for {var}")]
    InvalidNumber { var: String, value: String },
    #[error("http client setup failed: {0}")]
    Client(String),
    #[error("runtime setup failed: {0}")]
    Runtime(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    base_url: Url,
    /// Ceiling for a whole chat exchange, measured from dispatch.
    pub chat_timeout: Duration,
    /// Deadline for the advisory health probe only.
    pub health_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: normalize_base(Url::parse(DEFAULT_BASE_URL).expect("default base url")),
            chat_timeout: Duration::from_secs(120),
            health_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            base_url: normalize_base(parsed),
            ..Self::default()
        })
    }

    /// Resolves settings from `TUTOR_API_URL` and `TUTOR_CHAT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut settings = match lookup(ENV_BASE_URL) {
            Some(url) if !url.trim().is_empty() => Self::with_base_url(url.trim())?,
            _ => Self::default(),
        };
        if let Some(raw) = lookup(ENV_CHAT_TIMEOUT) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidNumber {
                    var: ENV_CHAT_TIMEOUT.to_string(),
                    value: raw.clone(),
                })?;
            settings.chat_timeout = Duration::from_secs(secs);
        }
        Ok(settings)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, name: &str) -> Url {
        // `name` is a fixed relative segment and the base always ends in '/'.
        self.base_url
            .join(name)
            .unwrap_or_else(|_| self.base_url.clone())
    }
}

// A trailing slash makes `join` append instead of replacing the last segment.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
