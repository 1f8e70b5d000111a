//! Postgres access: pool, migrations, readiness probe and the NUMERIC
//! conversions shared by the services.

use crate::config::DatabaseConfig;
use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const MIN_IDLE_CONNECTIONS: u32 = 2;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Open the pool; connections are validated before each checkout
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let connect_options =
        PgConnectOptions::from_str(&config.url)?.application_name("wellness-tracker");
    let min_connections = MIN_IDLE_CONNECTIONS.min(config.max_connections);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    info!(max = config.max_connections, min = min_connections, "Database pool created");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// `SELECT 1` round-trip for the readiness probe
pub async fn health_check(pool: &PgPool) -> Result<()> {
    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        warn!(error = %e, "Database health check failed");
        return Err(e.into());
    }
    Ok(())
}

/// NUMERIC column value as f64; out-of-range values read as zero
pub fn dec_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// f64 as NUMERIC; NaN and infinities become zero
pub fn f64_to_dec(v: f64) -> Decimal {
    Decimal::try_from(v).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_conversions() {
        assert_eq!(dec_to_f64(Decimal::new(725, 1)), 72.5);
        assert_eq!(f64_to_dec(72.5), Decimal::new(725, 1));
        assert_eq!(f64_to_dec(f64::NAN), Decimal::ZERO);
        assert_eq!(f64_to_dec(f64::INFINITY), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let config = DatabaseConfig {
            url: "not a url".to_string(),
            max_connections: 1,
        };
        assert!(create_pool(&config).await.is_err());
    }
}
