use std::fmt;

use chrono::Duration;
use tracing::warn;

/// Production OpenTok REST host.
pub const DEFAULT_API_HOST: &str = "https://api.opentok.com";

/// Path of the session creation endpoint, relative to the API host.
pub const SESSION_CREATE_PATH: &str = "/session/create";

/// 30 days in seconds
pub const DAYS_30: i64 = 30 * 24 * 60 * 60;

/// One week in seconds
pub const WEEKS_1: i64 = 7 * 24 * 60 * 60;

/// 24 hours in seconds
pub const HOURS_24: i64 = 24 * 60 * 60;

/// 2 hours in seconds
pub const HOURS_2: i64 = 2 * 60 * 60;

/// 1 hour in seconds
pub const HOURS_1: i64 = 60 * 60;

/// 5 minutes in seconds. OpenTok rejects project tokens whose `exp` is further
/// out than this.
pub const MINUTES_5: i64 = 5 * 60;

/// Lifetime of the project token minted for each REST call.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = MINUTES_5;

/// Credentials and endpoint for talking to the OpenTok REST API.
///
/// Built once by the embedding application and shared read-only between
/// requests. Nothing here is read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub partner_secret: String,
    /// Overrides [`DEFAULT_API_HOST`], e.g. for the beta program or a mock server.
    pub base_url: Option<String>,
    pub token_lifetime: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, partner_secret: impl Into<String>) -> Self {
        let config = Self {
            api_key: api_key.into(),
            partner_secret: partner_secret.into(),
            base_url: None,
            token_lifetime: Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS),
        };

        if !config.is_configured() {
            warn!("OpenTok client not fully configured - API key or partner secret is empty");
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = if base_url.is_empty() { None } else { Some(base_url) };
        self
    }

    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        if lifetime > Duration::seconds(MINUTES_5) {
            warn!(
                "Token lifetime of {}s exceeds the {}s maximum accepted by OpenTok",
                lifetime.num_seconds(),
                MINUTES_5
            );
        }
        self.token_lifetime = lifetime;
        self
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) => url.trim_end_matches('/'),
            None => DEFAULT_API_HOST,
        }
    }

    pub fn session_create_url(&self) -> String {
        format!("{}{}", self.endpoint(), SESSION_CREATE_PATH)
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.partner_secret.is_empty()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("partner_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("token_lifetime", &self.token_lifetime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::new("12345", "secret");
        assert_eq!(config.endpoint(), DEFAULT_API_HOST);
        assert_eq!(
            config.session_create_url(),
            "https://api.opentok.com/session/create"
        );
    }

    #[test]
    fn test_endpoint_override() {
        let config = ClientConfig::new("12345", "secret").with_base_url("https://beta.example.com/");
        assert_eq!(config.endpoint(), "https://beta.example.com");
        assert_eq!(
            config.session_create_url(),
            "https://beta.example.com/session/create"
        );
    }

    #[test]
    fn test_empty_override_falls_back_to_default() {
        let config = ClientConfig::new("12345", "secret").with_base_url("");
        assert_eq!(config.base_url, None);
        assert_eq!(config.endpoint(), DEFAULT_API_HOST);
    }

    #[test]
    fn test_is_configured() {
        assert!(ClientConfig::new("12345", "secret").is_configured());
        assert!(!ClientConfig::new("", "secret").is_configured());
        assert!(!ClientConfig::new("12345", "").is_configured());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ClientConfig::new("12345", "super-secret-value");
        let output = format!("{:?}", config);
        assert!(output.contains("12345"));
        assert!(!output.contains("super-secret-value"));
    }

    #[test]
    fn test_duration_constants() {
        assert_eq!(DAYS_30, 2_592_000);
        assert_eq!(WEEKS_1, 604_800);
        assert_eq!(HOURS_24, 86_400);
        assert_eq!(HOURS_2, 7_200);
        assert_eq!(HOURS_1, 3_600);
        assert_eq!(
            ClientConfig::new("k", "s").token_lifetime,
            Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS)
        );
    }
}
