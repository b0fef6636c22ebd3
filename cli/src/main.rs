//! Account service — CLI server
//!
//! Headless account backend suitable for deployment as a systemd
//! service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/account-service/config.toml)
//! account-cli
//!
//! # Custom config path and port
//! account-cli --config /etc/account-service/config.toml --port 8080
//!
//! # Validate config without starting
//! account-cli --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use account_service::config::AppConfig;
use account_service::default_config_path;
use account_service::server::{init_tracing, ServerHandle, ServerOptions};

/// Account service — registration, login and account administration.
#[derive(Parser, Debug)]
#[command(
    name = "account-cli",
    version,
    about = "User account service with JWT authentication",
    long_about = "REST API server for user registration, password login, \
                  profile lookup and account blocking.\n\n\
                  Default config: ~/.config/account-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ACCOUNT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin account.
    #[arg(long)]
    no_admin: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Invalid configuration ({}): {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut config);

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        if config.database.in_memory {
            println!("   Database    : in-memory");
        } else {
            println!("   Database    : {}", config.database.url);
        }
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    ExitCode::SUCCESS
}
