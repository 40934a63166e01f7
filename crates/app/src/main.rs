//! nowip front-end service entry point
//!
//! Loads configuration, installs tracing and runs the development proxy
//! until Ctrl-C.

use std::net::SocketAddr;

use anyhow::Context;
use nowip_app::utils::load_dotenv;
use nowip_app::AppContext;
use nowip_domain::Config;
use nowip_infra::{config, dev_proxy, init_tracing};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before tracing exists, so the outcome is logged further down.
    let dotenv = load_dotenv(None);

    let (config, load_error) = match config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    init_tracing(&config.logging).context("failed to initialize tracing")?;
    match dotenv {
        Ok(Some(path)) => info!(path = %path.display(), "loaded .env"),
        Ok(None) => {}
        Err(err) => warn!(error = %err, "could not load .env file"),
    }
    if let Some(err) = load_error {
        warn!(error = %err, "falling back to default configuration");
    }

    info!(
        environment = %config.environment,
        api = %config.api.base_url,
        dev_proxy = config.dev_proxy_active(),
        "starting nowip"
    );

    let addr: SocketAddr = config
        .dev_proxy
        .listen_addr
        .parse()
        .with_context(|| format!("invalid dev proxy address {}", config.dev_proxy.listen_addr))?;

    let ctx = AppContext::new(config).context("failed to build application context")?;

    let proxy = ctx.dev_proxy().context("failed to build dev proxy")?;
    dev_proxy::serve(proxy, addr, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for shutdown signal");
        }
    })
    .await
    .context("dev proxy server failed")?;

    info!("shutdown complete");
    Ok(())
}
