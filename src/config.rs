use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-05-20";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Settings for the remote generation endpoint
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub user_db: String,
    pub feedback_db: String,
    /// None means a random secret is generated at startup
    pub session_secret: Option<String>,
    pub cors_origins: Vec<String>,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Reads the configuration from the environment (after `dotenv`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = get("PORT", "5001")
            .parse::<u16>()
            .map_err(|e| ConfigError(format!("PORT: {}", e)))?;

        let timeout_secs = get("AI_TIMEOUT_SECS", &DEFAULT_AI_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError(format!("AI_TIMEOUT_SECS: {}", e)))?;

        let cors_origins = get("CORS_ORIGINS", "http://localhost:5001")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: get("HOST", "0.0.0.0"),
            port,
            user_db: get("USER_DB", "users.json"),
            feedback_db: get("FEEDBACK_DB", "feedback.json"),
            session_secret: lookup("SESSION_SECRET").filter(|v| !v.is_empty()),
            cors_origins,
            gemini: GeminiConfig {
                base_url: get("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                model: get("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.user_db, "users.json");
        assert_eq!(config.feedback_db, "feedback.json");
        assert!(config.session_secret.is_none());
        assert_eq!(config.gemini.timeout, Duration::from_secs(30));
        assert_eq!(config.gemini.api_key, "");
        assert_eq!(
            config.gemini.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent"
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("AI_TIMEOUT_SECS", "5"),
            ("GEMINI_BASE_URL", "http://127.0.0.1:9999/"),
            ("GEMINI_MODEL", "test-model"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.gemini.timeout, Duration::from_secs(5));
        assert_eq!(
            config.gemini.endpoint(),
            "http://127.0.0.1:9999/v1beta/models/test-model:generateContent"
        );
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
