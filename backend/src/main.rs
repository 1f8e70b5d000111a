//! Wellness Tracker Backend
//!
//! Health metrics, food/exercise/sleep logging, AI diet plans and health
//! reports behind a JSON API.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Business logic, AI prompt/parse/fallback
//! - Repositories: Data access
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use redis::aio::ConnectionManager;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wellness_backend::{config, db, routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;
    let production = config::AppConfig::is_production();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if production { "production" } else { "development" },
        ai_enabled = config.ai.enabled,
        "Starting Wellness Tracker backend"
    );

    if production {
        if let Err(e) = config.validate_for_production() {
            error!("Configuration error: {}", e);
            anyhow::bail!("Invalid production configuration");
        }
        if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
            warn!("Database URL contains localhost - ensure this is intentional for production");
        }
    }

    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;

    // Production runs migrations as a separate job
    if !production {
        db::run_migrations(&db_pool).await?;
    }

    let redis_conn = connect_redis(&config.redis.url).await;
    let addr = config.server_addr();

    let mut state = AppState::new(db_pool, config).with_redis(redis_conn);
    if let Some(handle) = install_metrics() {
        state = state.with_metrics(handle);
    }

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Connect to Redis with graceful fallback
///
/// Returns None if Redis is unavailable; the AI quota is then not enforced
async fn connect_redis(url: &str) -> Option<ConnectionManager> {
    info!("Connecting to Redis...");

    let client = match redis::Client::open(url) {
        Ok(client) => client,
        Err(e) => {
            warn!("Invalid Redis URL: {}. AI quota will not be enforced.", e);
            return None;
        }
    };

    match ConnectionManager::new(client).await {
        Ok(conn) => {
            info!("Redis connection established");
            Some(conn)
        }
        Err(e) => {
            warn!("Failed to connect to Redis: {}. AI quota will not be enforced.", e);
            None
        }
    }
}

fn install_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            None
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "wellness_backend=info,tower_http=info".into()
        } else {
            "wellness_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for log aggregation
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
