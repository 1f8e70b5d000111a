//! User service for authentication and account management
//!
//! Password hashing and verification run on the blocking thread pool;
//! the JWT service is passed by reference with its keys pre-computed.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use wellness_shared::types::{AccountResponse, AuthTokens, RegisterRequest};
use wellness_shared::validation::{check_field, validate_email, validate_name, validate_password};

/// User service for authentication operations
pub struct UserService;

impl UserService {
    fn issue_tokens(jwt_service: &JwtService, user_id: Uuid) -> Result<AuthTokens, ApiError> {
        let access_token = jwt_service
            .generate_access_token(user_id)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt_service
            .generate_refresh_token(user_id)
            .map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.access_token_expiry_secs(),
        })
    }

    /// Register a new user with an empty profile
    pub async fn register(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: &RegisterRequest,
    ) -> Result<AuthTokens, ApiError> {
        let email = req.email.trim().to_lowercase();
        check_field("email", validate_email(&email))?;
        check_field("password", validate_password(&req.password))?;

        let display_name = req
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        if let Some(name) = display_name {
            check_field("display_name", validate_name(name, 100))?;
        }

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, &email, &password_hash, display_name)
            .await
            .map_err(ApiError::Internal)?;

        info!(user_id = %user.id, "User registered");
        Self::issue_tokens(jwt_service, user.id)
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let email = email.trim().to_lowercase();
        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?;

        let Some(user) = user else {
            // Same hashing cost as a real check so unknown e-mails are not distinguishable
            PasswordService::verify_dummy(password.to_string()).await;
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        };

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::issue_tokens(jwt_service, user.id)
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt_service
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Self::issue_tokens(jwt_service, user_id)
    }

    /// The signed-in account
    pub async fn get_account(pool: &PgPool, user_id: Uuid) -> Result<AccountResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(AccountResponse {
            id: user.id.to_string(),
            email: user.email,
            created_at: user.created_at,
        })
    }
}
