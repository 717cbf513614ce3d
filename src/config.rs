use anyhow::{Context, Result};

/// Fixed debounce window applied when `DEBOUNCE_MS` is unset.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

#[derive(Debug, Clone)]
pub struct Config {
    // Gemini
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Base URL of the generative-language API. Overridable so tests can
    /// point the client at a mock server.
    pub gemini_api_url: String,

    // Persistence
    pub history_path: String,

    // Input handling
    pub debounce_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Gemini
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY not set")?,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-3-flash-preview".to_string()),
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),

            // Persistence
            history_path: std::env::var("HISTORY_PATH")
                .unwrap_or_else(|_| "odia_translator_history.json".to_string()),

            // Input handling
            debounce_ms: std::env::var("DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DEBOUNCE_MS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "GEMINI_API_KEY",
            "GEMINI_MODEL",
            "GEMINI_API_URL",
            "HISTORY_PATH",
            "DEBOUNCE_MS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clear_env();
        let result = Config::from_env();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("GEMINI_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("GEMINI_API_KEY", "test-key");
        let config = Config::from_env().expect("Should load");
        assert_eq!(config.gemini_api_key, "test-key");
        assert_eq!(config.gemini_model, "gemini-3-flash-preview");
        assert_eq!(
            config.gemini_api_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.history_path, "odia_translator_history.json");
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("GEMINI_API_KEY", "test-key");
        std::env::set_var("GEMINI_MODEL", "gemini-test");
        std::env::set_var("GEMINI_API_URL", "http://localhost:9999");
        std::env::set_var("HISTORY_PATH", "/tmp/history.json");
        std::env::set_var("DEBOUNCE_MS", "150");
        let config = Config::from_env().expect("Should load");
        assert_eq!(config.gemini_model, "gemini-test");
        assert_eq!(config.gemini_api_url, "http://localhost:9999");
        assert_eq!(config.history_path, "/tmp/history.json");
        assert_eq!(config.debounce_ms, 150);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_unparseable_debounce() {
        clear_env();
        std::env::set_var("GEMINI_API_KEY", "test-key");
        std::env::set_var("DEBOUNCE_MS", "soon");
        let config = Config::from_env().expect("Should load");
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        clear_env();
    }
}
