//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `NOWIP_API_URL` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `NOWIP_API_URL`: API base URL (required for the environment path)
//! - `NOWIP_API_TIMEOUT`: Request timeout in seconds
//! - `NOWIP_BASE_DNS_DOMAIN`: Zone user domains live under
//! - `NOWIP_APP_ENABLE_SIGNUP`: Whether the signup page is offered (true/false)
//! - `NOWIP_ENV`: `development` or `production`
//! - `USE_DEV_PROXY`: Enables the development proxy (true/false)
//! - `PROXY_TARGET`: Upstream the development proxy forwards to
//! - `NOWIP_DEV_PROXY_ADDR`: Listen address of the development proxy
//! - `NOWIP_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//! - `NOWIP_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! `NOWIP_ENV`, `USE_DEV_PROXY` and `PROXY_TARGET` also override values read
//! from a file, so the proxy can be switched on without editing config.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./nowip.json` or `./nowip.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use nowip_domain::{
    ApiConfig, Config, DevProxyConfig, DnsConfig, Environment, FeatureConfig, LoggingConfig,
    NowipError, Result,
};

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "nowip.json", "nowip.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `NowipError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - An environment variable has an invalid value
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `NOWIP_API_URL` is required; everything else has a default.
///
/// # Errors
/// Returns `NowipError::Config` if the required variable is missing or a
/// value cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let api = ApiConfig {
        base_url: env_var("NOWIP_API_URL")?,
        timeout_seconds: env_parse("NOWIP_API_TIMEOUT")?.unwrap_or(defaults.api.timeout_seconds),
    };

    let dns = DnsConfig {
        base_domain: env_opt("NOWIP_BASE_DNS_DOMAIN").unwrap_or(defaults.dns.base_domain),
    };

    let features = FeatureConfig { signup_enabled: env_bool("NOWIP_APP_ENABLE_SIGNUP", false) };

    let dev_proxy = DevProxyConfig {
        enabled: env_bool("USE_DEV_PROXY", false),
        target: env_opt("PROXY_TARGET").unwrap_or(defaults.dev_proxy.target),
        listen_addr: env_opt("NOWIP_DEV_PROXY_ADDR").unwrap_or(defaults.dev_proxy.listen_addr),
    };

    let logging = LoggingConfig {
        level: env_opt("NOWIP_LOG_LEVEL").unwrap_or(defaults.logging.level),
        json: env_bool("NOWIP_LOG_JSON", false),
    };

    Ok(Config {
        environment: env_environment()?.unwrap_or_default(),
        api,
        dns,
        features,
        dev_proxy,
        logging,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `NowipError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(NowipError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            NowipError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| NowipError::Config(format!("Failed to read config file: {e}")))?;

    let mut config = parse_config(&contents, &config_path)?;
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| NowipError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| NowipError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(NowipError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(environment) = env_environment()? {
        config.environment = environment;
    }
    if std::env::var_os("USE_DEV_PROXY").is_some() {
        config.dev_proxy.enabled = env_bool("USE_DEV_PROXY", false);
    }
    if let Some(target) = env_opt("PROXY_TARGET") {
        config.dev_proxy.target = target;
    }
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the directory of
/// the running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join(".."));
        dirs.insert(0, cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `NowipError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        NowipError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Non-empty value of an optional environment variable.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| NowipError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

fn env_environment() -> Result<Option<Environment>> {
    env_opt("NOWIP_ENV")
        .map(|raw| raw.parse::<Environment>().map_err(NowipError::Config))
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
