//! Route definitions for the wellness API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod diet_plan;
mod exercise;
mod export;
mod food;
mod goals;
mod health;
mod health_card;
mod health_metrics;
mod profile;
mod reports;
mod sleep;
mod summary;

pub use auth::auth_routes;

const MAX_BODY_BYTES: usize = 1024 * 1024;
/// Headroom on top of the AI client timeout for the surrounding queries
const TIMEOUT_HEADROOM_SECS: u64 = 15;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().ai.request_timeout_secs + TIMEOUT_HEADROOM_SECS);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(health::prometheus_metrics))
        .nest("/api", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::auth_routes())
        .nest("/health", health_metrics::health_metrics_routes())
        .nest("/food", food::food_routes())
        .nest("/exercise", exercise::exercise_routes())
        .nest("/sleep", sleep::sleep_routes())
        .nest("/diet-plan", diet_plan::diet_plan_routes())
        .nest("/reports", reports::report_routes())
        .nest("/health-card", health_card::health_card_routes())
        .nest("/goals", goals::goals_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/summary", summary::summary_routes())
        .nest("/export", export::export_routes())
}
