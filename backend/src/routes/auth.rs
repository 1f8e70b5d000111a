//! Authentication routes
//!
//! Provides endpoints for user registration, login, logout and token refresh.
//!
//! Register and login return the token pair as JSON and also set the
//! `session` cookie used by the browser client. Password hashing runs on the
//! blocking thread pool.

use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::auth::AuthUser;
use crate::config::AppConfig;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use wellness_shared::types::{
    AccountResponse, AuthTokens, LoginRequest, RefreshRequest, RegisterRequest,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

fn with_session(tokens: &AuthTokens) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session_cookie(&tokens.access_token, tokens.expires_in, AppConfig::is_production()),
    );
    headers
}

/// Register a new user
///
/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, HeaderMap, Json<AuthTokens>)> {
    let tokens = UserService::register(state.db(), state.jwt(), &req).await?;
    Ok((StatusCode::CREATED, with_session(&tokens), Json(tokens)))
}

/// Login with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(HeaderMap, Json<AuthTokens>)> {
    let tokens = UserService::login(state.db(), state.jwt(), &req.email, &req.password).await?;
    Ok((with_session(&tokens), Json(tokens)))
}

/// Exchange a refresh token for a new pair; the session cookie is renewed
///
/// POST /api/auth/refresh
async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<(HeaderMap, Json<AuthTokens>)> {
    let tokens = UserService::refresh_token(state.db(), state.jwt(), &req.refresh_token).await?;
    Ok((with_session(&tokens), Json(tokens)))
}

/// POST /api/auth/logout - Clear the session cookie
async fn logout() -> (StatusCode, HeaderMap) {
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear_session_cookie());
    (StatusCode::NO_CONTENT, headers)
}

/// Get the signed-in account
///
/// GET /api/auth/me
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<AccountResponse>> {
    let account = UserService::get_account(state.db(), auth.user_id).await?;
    Ok(Json(account))
}
