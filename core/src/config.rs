//! Construction-time settings for `PanelClient`.

use std::env;
use std::time::Duration;

use crate::error::{ApiError, Result};

/// Panel URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://panel.localhost";

/// Whole-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable read by [`ClientConfig::from_env`] for the panel URL.
pub const HOST_ENV: &str = "PTERODACTYL_HOST";

/// Environment variable read by [`ClientConfig::from_env`] for the API key.
pub const TOKEN_ENV: &str = "PTERODACTYL_TOKEN";

/// Immutable client settings.
///
/// A config without a token is valid: the client can be built, but every
/// call will be rejected by the panel's authorization check.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Hand-written so the API key never ends up in logs or panic messages.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Read `PTERODACTYL_HOST` and `PTERODACTYL_TOKEN`, falling back to the
    /// defaults for whichever is unset or empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            base_url: non_empty(HOST_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: non_empty(TOKEN_ENV),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Check the settings and normalize the base URL (one trailing `/` removed).
    pub(crate) fn validated(mut self) -> Result<Self> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ApiError::Config("timeout must be non-zero".to_string()));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }
}
