//! Lecturer Claims - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin lecturer-claims-api
//!
//! API_PORT=8080 API_DATABASE_URL=postgres://... CLAIMS__MAX_HOURS=160 \
//!     cargo run --bin lecturer-claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_DATABASE_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_DATABASE_CONNECT_TIMEOUT_SECS` - Wait for a pooled connection (default: 30)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_UPLOAD_DIR` - Where supporting documents are written (default: wwwroot/uploads)
//! * `CLAIMS__MAX_HOURS`, `CLAIMS__MAX_HOURLY_RATE` - Automatic rejection ceilings
//! * `CLAIMS__DOCUMENTS__ALLOWED_EXTENSIONS`, `CLAIMS__DOCUMENTS__MAX_SIZE_BYTES` - Upload policy

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::{ClaimService, LocalDocumentStore};
use domain_lecturer::LecturerService;
use infra_db::{create_pool, run_migrations, PostgresClaimStore, PostgresLecturerStore};
use interface_api::config::{load_claim_rules, ApiConfig};
use interface_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env for local runs.
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Invalid API_* configuration")?;
    let rules = load_claim_rules().context("Invalid CLAIMS__* configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        max_hours = %rules.max_hours,
        max_hourly_rate = %rules.max_hourly_rate,
        "Starting Lecturer Claims API Server"
    );

    let pool = create_pool(config.database_config())
        .await
        .context("Database connection failed")?;
    run_migrations(&pool).await.context("Database migration failed")?;

    let documents = LocalDocumentStore::new(
        &config.upload_dir,
        &config.upload_url_prefix,
        rules.documents.clone(),
    );
    let claims = ClaimService::new(
        Arc::new(PostgresClaimStore::new(pool.clone())),
        Arc::new(documents),
        rules,
    );
    let lecturers = LecturerService::new(Arc::new(PostgresLecturerStore::new(pool)));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;
    let app = create_router(AppState::new(claims, lecturers, config));

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
