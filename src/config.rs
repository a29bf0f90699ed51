use std::time::Duration;

use url::Url;

use crate::backend::HttpBackend;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_AI_TURN_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid backend url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("backend url must be http or https, got {0}")]
    UnsupportedScheme(String),
}

/// Client settings resolved from flags, environment and defaults.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    /// Pause before each automatic AI turn.
    pub ai_turn_delay: Duration,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ai_turn_delay: DEFAULT_AI_TURN_DELAY,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(Self::new(url)),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn with_ai_turn_delay(mut self, delay: Duration) -> Self {
        self.ai_turn_delay = delay;
        self
    }

    pub fn http_backend(&self) -> HttpBackend {
        HttpBackend::new(self.base_url.clone())
    }
}
