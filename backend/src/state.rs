//! Application state management
//!
//! Shared resources handed to every handler through Axum's state
//! extraction. Everything inside is cheap to clone (pools, `Arc`s).

use crate::ai::AiServices;
use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::rate_limit::AiQuota;
use metrics_exporter_prometheus::PrometheusHandle;
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    pub ai: AiServices,
    pub quota: AiQuota,
    /// Prometheus render handle; `None` when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from config. AI clients come from `config.ai`; a client
    /// that cannot be built disables AI rather than failing start-up.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );

        let ai = AiServices::from_config(&config.ai).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build AI clients, AI features disabled");
            AiServices::disabled()
        });

        Self {
            db,
            config: Arc::new(config),
            jwt,
            ai,
            quota: AiQuota::unenforced(),
            metrics: None,
        }
    }

    pub fn with_redis(mut self, redis: Option<ConnectionManager>) -> Self {
        self.quota = AiQuota::new(redis, self.config.ai.max_generations_per_hour);
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn with_ai(mut self, ai: AiServices) -> Self {
        self.ai = ai;
        self
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn ai(&self) -> &AiServices {
        &self.ai
    }

    #[inline]
    pub fn quota(&self) -> &AiQuota {
        &self.quota
    }
}
