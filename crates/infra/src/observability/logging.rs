//! Tracing subscriber initialisation for the nowip binary

use nowip_domain::{LoggingConfig, NowipError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, falling back to the configured level.
///
/// # Errors
/// Returns `NowipError::Config` when the configured level is not a valid
/// filter directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| NowipError::Config(format!("Invalid log level '{}': {e}", config.level))),
    }
}

/// Install the global subscriber: plain text or one JSON object per line.
///
/// # Errors
/// Returns `NowipError::Config` for an invalid level and
/// `NowipError::Internal` when a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(tracing_subscriber::fmt::layer().json().with_current_span(false)).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| NowipError::Internal(format!("Failed to install tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig { level: "nowip=loudest".into(), json: false };
        assert!(matches!(build_filter(&config), Err(NowipError::Config(_))));
    }

    #[test]
    fn accepts_directive_lists() {
        let config = LoggingConfig { level: "info,nowip_core=debug".into(), json: true };
        assert!(build_filter(&config).is_ok());
    }
}
