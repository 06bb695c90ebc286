//! Client configuration.

use crate::oracle::DEFAULT_BASE_URL;

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "ORACLE_API_BASE";

/// Configuration for the Oracle client.
///
/// Use the builder pattern to customize, or [`OracleConfig::from_env`] to
/// pick up the environment.
///
/// # Example
///
/// ```ignore
/// use card_oracle::config::OracleConfig;
///
/// let config = OracleConfig::new().with_base_url("http://oracle.local:8000");
/// ```
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Base URL of the Card Oracle backend
    pub base_url: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl OracleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create config from the environment.
    ///
    /// `ORACLE_API_BASE` overrides the base URL when set to a non-blank
    /// value; otherwise the localhost default applies.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self { base_url }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(OracleConfig::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_overrides_base_url() {
        let config = OracleConfig::new().with_base_url("http://oracle:9000");
        assert_eq!(config.base_url, "http://oracle:9000");
    }

    #[test]
    #[serial]
    fn test_from_env_reads_override() {
        std::env::set_var(BASE_URL_ENV, " http://env-host:8000 ");
        let config = OracleConfig::from_env();
        std::env::remove_var(BASE_URL_ENV);
        assert_eq!(config.base_url, "http://env-host:8000");
    }

    #[test]
    #[serial]
    fn test_from_env_blank_falls_back_to_default() {
        std::env::set_var(BASE_URL_ENV, "   ");
        let config = OracleConfig::from_env();
        std::env::remove_var(BASE_URL_ENV);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
