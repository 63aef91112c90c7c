use super::{DbPool, NewSession, SessionRecord};

pub async fn insert_session(pool: &DbPool, params: NewSession<'_>) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO sessions (token_hash, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(params.token_hash)
    .bind(params.user_id)
    .bind(params.created_at)
    .bind(params.expires_at)
    .execute(pool)
    .await?;
    tracing::debug!(user_id = params.user_id, expires_at = params.expires_at, "Session created");
    Ok(())
}

/// 查找未过期的会话。时间戳统一为 RFC 3339 UTC，可以直接按字符串比较
pub async fn find_active_session(
    pool: &DbPool,
    token_hash: &str,
    now: &str,
) -> Result<Option<SessionRecord>, sqlx::Error> {
    sqlx::query_as::<_, SessionRecord>(
        "SELECT token_hash, user_id, created_at, expires_at FROM sessions \
         WHERE token_hash = ? AND expires_at > ?",
    )
    .bind(token_hash)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn delete_session(pool: &DbPool, token_hash: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
        .bind(token_hash)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_expired_sessions(pool: &DbPool, now: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;
    if result.rows_affected() > 0 {
        tracing::debug!(rows = result.rows_affected(), "Expired sessions removed");
    }
    Ok(result.rows_affected())
}
