use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::AppError;

const TOKEN_LEN: usize = 64;
const WINDOW_SECONDS: i64 = 60;

/// Anonymous, IP-scoped credential row. Not tied to a user identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionToken {
    pub token: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub ip_address: String,
    pub rate_limit: i64,
    pub window_start: i64,
    pub request_count: i64,
}

/// Outcome of validating a token against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Invalid,
    Expired,
    RateLimited,
}

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// Newest unexpired token for the IP, or a freshly issued one. One live token
/// per IP is reused until it expires.
pub async fn issue_or_reuse(
    db: &SqlitePool,
    ip_address: &str,
    config: &SessionConfig,
) -> Result<String, AppError> {
    let now = now_unix();
    let existing = sqlx::query_scalar::<_, String>(
        r#"
        SELECT token FROM session_tokens
        WHERE ip_address = ? AND expires_at > ?
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(ip_address)
    .bind(now)
    .fetch_optional(db)
    .await?;

    if let Some(token) = existing {
        debug!(ip = %ip_address, "reusing active session token");
        return Ok(token);
    }

    let token = generate_token();
    sqlx::query(
        r#"
        INSERT INTO session_tokens (token, created_at, expires_at, ip_address, rate_limit)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&token)
    .bind(now)
    .bind(now + config.ttl_seconds)
    .bind(ip_address)
    .bind(config.rate_limit)
    .execute(db)
    .await?;
    info!(ip = %ip_address, "session token created");
    Ok(token)
}

/// Validate a token and record the request against its fixed 60-second window.
///
/// Expired tokens are deleted on sight, so a later lookup reports `Invalid`.
/// Window rollover and the request-count increment happen in one conditional
/// UPDATE; the limiter stays fail-open (the expiry check and the counter update
/// are separate statements) but the counter itself cannot lose increments.
pub async fn validate_and_track(db: &SqlitePool, token: &str) -> Result<TokenStatus, AppError> {
    let now = now_unix();
    let row = sqlx::query_as::<_, SessionToken>(
        "SELECT token, created_at, expires_at, ip_address, rate_limit, window_start, request_count
         FROM session_tokens WHERE token = ?",
    )
    .bind(token)
    .fetch_optional(db)
    .await?;

    let Some(row) = row else {
        warn!("invalid session token presented");
        return Ok(TokenStatus::Invalid);
    };

    if row.expires_at < now {
        sqlx::query("DELETE FROM session_tokens WHERE token = ?")
            .bind(token)
            .execute(db)
            .await?;
        info!(ip = %row.ip_address, "expired session token removed");
        return Ok(TokenStatus::Expired);
    }

    let window = now - now % WINDOW_SECONDS;
    let updated = sqlx::query(
        r#"
        UPDATE session_tokens
        SET request_count = CASE WHEN window_start = ?1 THEN request_count + 1 ELSE 1 END,
            window_start = ?1
        WHERE token = ?2
          AND (window_start <> ?1 OR request_count < rate_limit)
        "#,
    )
    .bind(window)
    .bind(token)
    .execute(db)
    .await?;

    if updated.rows_affected() == 0 {
        warn!(ip = %row.ip_address, "rate limit exceeded");
        return Ok(TokenStatus::RateLimited);
    }

    debug!("session token validated");
    Ok(TokenStatus::Valid)
}
