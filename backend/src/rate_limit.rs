//! Per-user quota on AI generation requests
//!
//! Fixed window counter in Redis: INCR the user's key and give it an expiry
//! in the same transaction, reject once the count passes the limit. Without
//! Redis the quota is not enforced.

use crate::error::ApiError;
use redis::aio::ConnectionManager;
use tracing::warn;
use uuid::Uuid;

const WINDOW_SECS: i64 = 3600;

#[derive(Clone)]
pub struct AiQuota {
    redis: Option<ConnectionManager>,
    max_per_window: u32,
}

impl AiQuota {
    pub fn new(redis: Option<ConnectionManager>, max_per_window: u32) -> Self {
        Self { redis, max_per_window }
    }

    pub fn unenforced() -> Self {
        Self::new(None, 0)
    }

    /// Round-trip to Redis; `None` when no connection was configured
    pub async fn ping(&self) -> Option<Result<(), String>> {
        let mut conn = self.redis.clone()?;
        let pong: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        Some(pong.map(|_| ()).map_err(|e| e.to_string()))
    }

    fn key(user_id: Uuid) -> String {
        format!("ai_quota:{}", user_id)
    }

    /// Count one generation request for `user_id`
    pub async fn consume(&self, user_id: Uuid) -> Result<(), ApiError> {
        let Some(redis) = &self.redis else {
            return Ok(());
        };
        if self.max_per_window == 0 {
            return Ok(());
        }

        let mut conn = redis.clone();
        let key = Self::key(user_id);

        let counted: Result<(i64,), _> = window_pipeline(&key).query_async(&mut conn).await;
        let count = match counted {
            Ok((count,)) => count,
            Err(e) => {
                warn!(error = %e, "Redis unavailable, AI quota not enforced");
                return Ok(());
            }
        };

        check_count(count, self.max_per_window)
    }
}

/// INCR plus `EXPIRE .. NX` in one MULTI/EXEC, so every counted key carries
/// a TTL even if an earlier expiry was lost. `NX` keeps the window fixed.
fn window_pipeline(key: &str) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("INCR")
        .arg(key)
        .cmd("EXPIRE")
        .arg(key)
        .arg(WINDOW_SECS)
        .arg("NX")
        .ignore();
    pipe
}

fn check_count(count: i64, max: u32) -> Result<(), ApiError> {
    if count > max as i64 {
        return Err(ApiError::RateLimited(format!(
            "AI generation limit of {} per hour reached, try again later",
            max
        )));
    }
    Ok(())
}
