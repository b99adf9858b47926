//! Configuration for the AgroLink client core

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, Result};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://api.agrolink.in`
    pub base_url: String,

    /// Deadline for ordinary JSON requests
    pub request_timeout: Duration,

    /// Deadline for requests carrying attachments (images)
    pub upload_timeout: Duration,

    /// Minimum time the splash surface stays mounted
    pub splash_delay: Duration,

    /// Directory holding persisted credentials and preferences
    pub credentials_dir: PathBuf,

    /// User-Agent sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Create config with sensible defaults
    ///
    /// The credentials directory comes from `AGROLINK_CREDENTIALS_DIR`
    /// when set, else `./.agrolink`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(300), // 5 minutes
            splash_delay: Duration::from_millis(2000),
            credentials_dir: std::env::var("AGROLINK_CREDENTIALS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".agrolink")),
            user_agent: format!("agrolink-core/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Build from environment variables
    ///
    /// `AGROLINK_API_URL` is required. Optional overrides:
    /// `AGROLINK_REQUEST_TIMEOUT_SECS`, `AGROLINK_UPLOAD_TIMEOUT_SECS`,
    /// `AGROLINK_SPLASH_DELAY_MS`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("AGROLINK_API_URL")
            .map_err(|_| ClientError::Config("AGROLINK_API_URL is not set".into()))?;

        let mut config = Self::new(base_url);
        if let Some(secs) = env_u64("AGROLINK_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_u64("AGROLINK_UPLOAD_TIMEOUT_SECS")? {
            config.upload_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = env_u64("AGROLINK_SPLASH_DELAY_MS")? {
            config.splash_delay = Duration::from_millis(ms);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    pub fn with_splash_delay(mut self, delay: Duration) -> Self {
        self.splash_delay = delay;
        self
    }

    pub fn with_credentials_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.credentials_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check that the base URL is absolute http(s) and deadlines are non-zero
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "Unsupported URL scheme: {}",
                url.scheme()
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ClientError::Config("request timeout must be greater than zero".into()));
        }
        if self.upload_timeout.is_zero() {
            return Err(ClientError::Config("upload timeout must be greater than zero".into()));
        }
        Ok(())
    }

    /// Join an absolute API path (`/api/...`) onto the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = Url::parse(&self.base_url)?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ClientError::Config(format!("{key} must be an integer, got `{raw}`"))),
        Err(_) => Ok(None),
    }
}
