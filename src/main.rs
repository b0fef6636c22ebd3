//! Account service
//!
//! Reads configuration from a TOML file
//! (`~/.config/account-service/config.toml`, or `$ACCOUNT_CONFIG`).

use std::path::PathBuf;

use tracing::{error, info};

use account_service::config::AppConfig;
use account_service::default_config_path;
use account_service::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("ACCOUNT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_tracing(&AppConfig::default());
            error!("Invalid configuration ({}): {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
