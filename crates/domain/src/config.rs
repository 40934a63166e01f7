//! Configuration structures
//!
//! Populated by the infra loader from environment variables or a JSON/TOML
//! file. Every section has defaults so partial files are accepted.

use serde::{Deserialize, Serialize};

use crate::impl_str_conversions;

/// Default API base URL when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3003";

/// Default upstream for the development proxy.
pub const DEFAULT_PROXY_TARGET: &str = "https://api.nowip.is-on.net";

/// Path prefix the development proxy is mounted under.
pub const DEV_PROXY_PREFIX: &str = "/api/proxy";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl_str_conversions!(Environment {
    Development => "development",
    Production => "production",
});

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,
    pub api: ApiConfig,
    pub dns: DnsConfig,
    pub features: FeatureConfig,
    pub dev_proxy: DevProxyConfig,
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_URL.to_string(), timeout_seconds: 30 }
    }
}

/// DNS naming settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsConfig {
    /// Zone that user domains are created under, e.g. `is-on.net`.
    pub base_domain: String,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self { base_domain: "is-on.net".to_string() }
    }
}

/// Toggles exposed to pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub signup_enabled: bool,
}

/// Development reverse proxy settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevProxyConfig {
    /// Opt-in switch; the proxy additionally requires a development environment.
    pub enabled: bool,
    pub target: String,
    pub listen_addr: String,
}

impl Default for DevProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target: DEFAULT_PROXY_TARGET.to_string(),
            listen_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

impl Config {
    /// Whether the development proxy may forward requests.
    pub fn dev_proxy_active(&self) -> bool {
        self.environment == Environment::Development && self.dev_proxy.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "api": { "base_url": "https://api.example" } }"#).unwrap();

        assert_eq!(config.api.base_url, "https://api.example");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.dev_proxy.target, DEFAULT_PROXY_TARGET);
    }

    #[test]
    fn dev_proxy_requires_development_environment() {
        let mut config = Config::default();
        config.dev_proxy.enabled = true;
        assert!(!config.dev_proxy_active());

        config.environment = Environment::Development;
        assert!(config.dev_proxy_active());

        config.dev_proxy.enabled = false;
        assert!(!config.dev_proxy_active());
    }

    #[test]
    fn environment_parses_from_env_style_strings() {
        assert_eq!("Development".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }
}
