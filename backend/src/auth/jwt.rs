//! JWT session tokens
//!
//! Access tokens identify the session (header or `session` cookie);
//! refresh tokens are exchanged for a new pair. Keys are derived once
//! and shared through `AppState`.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Token kinds carried in the `token_type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenKind,
    /// Unique per token so two tokens minted in the same second differ
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| anyhow::anyhow!("Invalid user ID in token"))
    }
}

/// Issues and validates tokens with keys derived at startup
#[derive(Clone)]
pub struct JwtService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expiry_secs: i64, refresh_expiry_secs: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            access_expiry_secs,
            refresh_expiry_secs,
        }
    }

    #[inline]
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, TokenKind::Access, self.access_expiry_secs)
    }

    #[inline]
    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, TokenKind::Refresh, self.refresh_expiry_secs)
    }

    fn issue(&self, user_id: Uuid, kind: TokenKind, expiry_secs: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
            token_type: kind,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate {:?} token: {}", kind, e))
    }

    fn validate(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;
        if data.claims.token_type != expected {
            anyhow::bail!("Expected a {:?} token", expected);
        }
        Ok(data.claims)
    }

    #[inline]
    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        self.validate(token, TokenKind::Access)
    }

    #[inline]
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims> {
        self.validate(token, TokenKind::Refresh)
    }

    /// Access token lifetime, also used as the session cookie Max-Age
    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_expiry_secs
    }
}
