//! Application configuration
//!
//! Configuration loaded from `.podloom.toml`, with environment overrides for
//! the values a site injects at runtime (endpoint URL and nonce).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding [`AppConfig::ajax_url`]
pub const ENV_AJAX_URL: &str = "PODLOOM_AJAX_URL";

/// Environment variable overriding [`AppConfig::nonce`]
pub const ENV_NONCE: &str = "PODLOOM_NONCE";

/// Application configuration loaded from .podloom.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend endpoint all block requests are sent to
    #[serde(default = "default_ajax_url")]
    pub ajax_url: String,

    /// Shared-secret token sent with every request
    #[serde(default)]
    pub nonce: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header for backend requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Page size requested from the RSS episodes endpoint
    #[serde(default = "default_rss_per_page")]
    pub rss_per_page: u32,
}

fn default_ajax_url() -> String {
    "http://localhost/wp-admin/admin-ajax.php".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("podloom/{}", env!("CARGO_PKG_VERSION"))
}

fn default_rss_per_page() -> u32 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ajax_url: default_ajax_url(),
            nonce: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            rss_per_page: default_rss_per_page(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults.
    /// Environment overrides are applied last.
    pub fn load() -> Self {
        Self::load_from_file().with_overrides(|key| std::env::var(key).ok())
    }

    fn load_from_file() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Apply endpoint overrides looked up by variable name
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_AJAX_URL).filter(|v| !v.is_empty()) {
            log::debug!("Endpoint overridden by {}", ENV_AJAX_URL);
            self.ajax_url = url;
        }
        if let Some(nonce) = lookup(ENV_NONCE) {
            self.nonce = nonce;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.ajax_url.ends_with("admin-ajax.php"));
        assert!(config.nonce.is_empty());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.rss_per_page, 10);
        assert!(config.user_agent.starts_with("podloom/"));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            ajax_url = "https://example.com/wp-admin/admin-ajax.php"
            nonce = "abc123"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.ajax_url, "https://example.com/wp-admin/admin-ajax.php");
        assert_eq!(config.nonce, "abc123");
        // Other fields should use defaults
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.rss_per_page, 10);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default().with_overrides(|key| match key {
            ENV_AJAX_URL => Some("https://site.test/ajax".to_string()),
            ENV_NONCE => Some("n0nce".to_string()),
            _ => None,
        });
        assert_eq!(config.ajax_url, "https://site.test/ajax");
        assert_eq!(config.nonce, "n0nce");
    }

    #[test]
    fn test_empty_url_override_is_ignored() {
        let config = AppConfig::default().with_overrides(|key| match key {
            ENV_AJAX_URL => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.ajax_url, AppConfig::default().ajax_url);
    }

    #[test]
    fn test_request_timeout() {
        let config = AppConfig {
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }
}
