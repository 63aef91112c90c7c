use super::{DbPool, NewUser, UserChanges, UserRecord};

pub(crate) const USER_FIELDS: &str = "user_id, name, email, password_hash, created_at";

pub async fn insert_user(pool: &DbPool, params: NewUser<'_>) -> Result<UserRecord, sqlx::Error> {
    let sql = format!(
        "INSERT INTO users (user_id, name, email, password_hash, created_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING {}",
        USER_FIELDS
    );
    let user = sqlx::query_as::<_, UserRecord>(&sql)
        .bind(params.user_id)
        .bind(params.name)
        .bind(params.email)
        .bind(params.password_hash)
        .bind(params.created_at)
        .fetch_one(pool)
        .await?;
    tracing::debug!(user_id = %user.user_id, email = %user.email, "User created");
    Ok(user)
}

pub async fn get_user_by_id(pool: &DbPool, user_id: &str) -> Result<Option<UserRecord>, sqlx::Error> {
    let sql = format!("SELECT {} FROM users WHERE user_id = ?", USER_FIELDS);
    sqlx::query_as::<_, UserRecord>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_user_by_email(pool: &DbPool, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
    let sql = format!("SELECT {} FROM users WHERE email = ?", USER_FIELDS);
    sqlx::query_as::<_, UserRecord>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// 邮箱是否已被其他用户占用
pub async fn email_taken_by_other(
    pool: &DbPool,
    email: &str,
    user_id: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ? AND user_id != ?")
            .bind(email)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

pub async fn update_user(
    pool: &DbPool,
    user_id: &str,
    changes: UserChanges<'_>,
) -> Result<Option<UserRecord>, sqlx::Error> {
    let sql = format!(
        "UPDATE users SET \
            name = COALESCE(?, name), \
            email = COALESCE(?, email), \
            password_hash = COALESCE(?, password_hash) \
         WHERE user_id = ? RETURNING {}",
        USER_FIELDS
    );
    let user = sqlx::query_as::<_, UserRecord>(&sql)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    tracing::debug!(
        user_id,
        name = ?changes.name,
        email = ?changes.email,
        password_changed = changes.password_hash.is_some(),
        "User updated"
    );
    Ok(user)
}

/// 删除用户；任务与会话由外键级联删除
pub async fn delete_user(pool: &DbPool, user_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    tracing::debug!(user_id, rows = result.rows_affected(), "User deleted");
    Ok(result.rows_affected() > 0)
}

/// 是否违反唯一约束（例如邮箱重复）
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
