//!
//! MobyPark parking management backend.
//! Reads configuration from TOML file (~/.config/mobypark/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use mobypark::application::{DiscountService, PaymentService, ReservationService, SessionService};
use mobypark::auth::{hash_password, JwtConfig};
use mobypark::config::AppConfig;
use mobypark::domain::{Role, RepositoryProvider, User};
use mobypark::infrastructure::database::migrator::Migrator;
use mobypark::{
    create_api_router, default_config_path, init_database, AppState, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("MOBYPARK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting MobyPark parking service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "mobypark".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // Create default admin user if the user table is empty
    create_default_admin(repos.as_ref(), &app_cfg).await;

    // ── Services ───────────────────────────────────────────────
    let discounts = Arc::new(DiscountService::new(repos.clone()));
    let sessions = Arc::new(SessionService::new(repos.clone(), discounts.clone()));
    let reservations = Arc::new(ReservationService::new(repos.clone()));
    let payments = Arc::new(PaymentService::new(repos.clone()));

    let state = AppState {
        repos,
        sessions,
        discounts,
        reservations,
        payments,
        jwt_config,
        prometheus: prometheus_handle,
    };

    let api_router = create_api_router(state);

    // ── HTTP server with graceful shutdown ─────────────────────
    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let server = axum::serve(listener, api_router).with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        error!("REST API server error: {}", e);
    }

    info!("Performing final cleanup...");
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("MobyPark parking service shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Create default admin user if no users exist
async fn create_default_admin(repos: &dyn RepositoryProvider, app_cfg: &AppConfig) {
    let users_count = match repos.users().count().await {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to count users: {}", e);
            return;
        }
    };
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");
    let password_hash = match hash_password(&app_cfg.admin.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let mut admin = User::new(app_cfg.admin.username.clone(), password_hash);
    admin.email = Some(app_cfg.admin.email.clone());
    admin.role = Role::Admin;

    match repos.users().save(admin).await {
        Ok(()) => {
            info!("Default admin created: {}", app_cfg.admin.username);
            info!("Please change the admin password immediately!");
        }
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}
