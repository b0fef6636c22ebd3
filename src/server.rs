//! Reusable account service runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! store selection, migrations, admin seeding, the REST API, metrics and
//! graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::AccountService;
use crate::config::{AdminSettings, AppConfig, ConfigError};
use crate::domain::{AccountRepositoryInterface, RegisterAccountDto, TokenIssuer};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{
    init_database, AccountRepository, BcryptHasher, DatabaseConfig, InMemoryAccountRepository,
    JwtConfig, JwtTokenIssuer,
};
use crate::interfaces::http::{create_api_router, RouterDeps};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Startup failures. Any of them aborts [`ServerHandle::start`].
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the account service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured administrator if its email is free (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── Metrics recorder ───────────────────────────────────────────────

/// The global recorder can only be installed once per process; restarts
/// within the same process reuse it. `None` if installation failed.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
                None
            }
        })
        .clone()
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running account service.
///
/// ```rust,no_run
/// use account_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Account use-cases, shared with the HTTP layer.
    pub accounts: Arc<AccountService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Open the account store (SQLite, or process memory) and migrate
    /// 3. Seed the administrator account (if enabled)
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, ServerError> {
        let app_cfg = opts.config;

        info!("Starting account service...");

        let metrics = prometheus_handle();

        // ── Crypto ─────────────────────────────────────────────
        let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(&JwtConfig::new(
            app_cfg.security.jwt_secret.clone(),
            app_cfg.security.jwt_issuer.clone(),
        ))?);
        let hasher = Arc::new(BcryptHasher::new(app_cfg.security.bcrypt_cost));

        // ── Store ──────────────────────────────────────────────
        let (repo, db): (Arc<dyn AccountRepositoryInterface>, Option<DatabaseConnection>) =
            if app_cfg.database.in_memory {
                info!("Accounts are kept in memory; nothing survives a restart");
                (Arc::new(InMemoryAccountRepository::new()), None)
            } else {
                let db_config = DatabaseConfig {
                    url: app_cfg.database.url.clone(),
                    max_connections: app_cfg.database.max_connections,
                };
                info!("Database: {}", db_config.url);
                let db = init_database(&db_config).await?;

                if opts.auto_migrate {
                    info!("Running database migrations...");
                    Migrator::up(&db, None).await?;
                    info!("Migrations completed");
                }
                (Arc::new(AccountRepository::new(db.clone())), Some(db))
            };

        let accounts = Arc::new(AccountService::new(repo, hasher, tokens.clone()));

        if opts.create_default_admin && app_cfg.admin.enabled {
            seed_admin(&accounts, &app_cfg.admin).await;
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(RouterDeps {
            accounts: accounts.clone(),
            tokens,
            db: db.clone(),
            metrics,
        });

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: api_addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: api_addr.clone(),
            source,
        })?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router.into_make_service())
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API server received shutdown signal");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            accounts,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking). Call [`wait`](Self::wait)
    /// to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to finish;
    /// after that the server task is aborted.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        let mut api_task = self.api_task;
        match tokio::time::timeout(self.shutdown.timeout(), &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!(
                    "REST API server did not stop within {:?}, aborting",
                    self.shutdown.timeout()
                );
                api_task.abort();
            }
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Account service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down account service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured administrator unless its email is already taken.
/// Failures are logged and never abort startup.
async fn seed_admin(accounts: &AccountService, admin: &AdminSettings) {
    let dto = RegisterAccountDto {
        full_name: admin.full_name.clone(),
        birth_date: admin.birth_date.clone(),
        email: admin.email.clone(),
        password: admin.password.clone(),
    };

    match accounts.ensure_admin(dto).await {
        Ok(Some(account)) => {
            info!(account_id = %account.id, email = %account.email, "Default admin created");
            warn!("Please change the default admin password immediately");
        }
        Ok(None) => info!(email = %admin.email, "Admin account already present"),
        Err(e) => error!("Failed to create admin account: {}", e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call once at process
/// startup; later calls leave the first subscriber in place.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}
