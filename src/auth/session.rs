use chrono::{TimeDelta, Utc};

use crate::db::{
    delete_expired_sessions, delete_session, find_active_session, insert_session, DbPool,
    NewSession,
};
use crate::error::{AppError, AppResult};
use crate::utils::crypto::{generate_session_token, hash_session_token};
use crate::utils::format_timestamp;

pub const SESSION_COOKIE: &str = "session_token";

/// 新会话。`token` 是明文，只在登录响应中出现一次
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: String,
}

/// 为用户创建会话，顺带清理过期会话
pub async fn create_session(
    pool: &DbPool,
    user_id: &str,
    ttl: TimeDelta,
) -> AppResult<IssuedSession> {
    let now = Utc::now();
    let expires = now
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Config(format!("session ttl out of range: {}", ttl)))?;
    let created_at = format_timestamp(now);
    let expires_at = format_timestamp(expires);

    delete_expired_sessions(pool, &created_at).await?;

    let token = generate_session_token();
    let token_hash = hash_session_token(&token);
    insert_session(
        pool,
        NewSession {
            token_hash: &token_hash,
            user_id,
            created_at: &created_at,
            expires_at: &expires_at,
        },
    )
    .await?;

    Ok(IssuedSession { token, expires_at })
}

/// 根据明文令牌查找有效会话，返回 (用户 ID, 令牌摘要)
pub async fn resolve_session(pool: &DbPool, token: &str) -> AppResult<Option<(String, String)>> {
    let token_hash = hash_session_token(token);
    let now = format_timestamp(Utc::now());
    let session = find_active_session(pool, &token_hash, &now).await?;
    Ok(session.map(|s| (s.user_id, s.token_hash)))
}

pub async fn revoke_session(pool: &DbPool, token_hash: &str) -> AppResult<()> {
    delete_session(pool, token_hash).await?;
    tracing::debug!("Session revoked");
    Ok(())
}

/// 登录成功时下发的 Cookie
pub fn session_cookie(token: &str, ttl: TimeDelta) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl.num_seconds()
    )
}

/// 注销时让浏览器删除 Cookie
pub fn expired_session_cookie() -> String {
    format!("{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_token_and_max_age() {
        let cookie = session_cookie("abc", TimeDelta::hours(1));
        assert_eq!(
            cookie,
            "session_token=abc; HttpOnly; Path=/; SameSite=Lax; Max-Age=3600"
        );
        assert!(expired_session_cookie().ends_with("Max-Age=0"));
    }

    #[tokio::test]
    async fn expiry_past_the_calendar_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::init_pool(&dir.path().join("sessions.sqlite3"))
            .await
            .unwrap();

        let err = create_session(&pool, "user-1", TimeDelta::MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
