use std::{path::Path, str::FromStr, time::Duration};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use super::{DbPool, MIGRATOR};
use crate::error::AppResult;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub async fn init_pool(db_path: impl AsRef<Path>) -> AppResult<DbPool> {
    init_pool_with(db_path, DEFAULT_MAX_CONNECTIONS).await
}

pub async fn init_pool_with(db_path: impl AsRef<Path>, max_connections: u32) -> AppResult<DbPool> {
    let db_path = db_path.as_ref();
    if let Some(parent) = db_path.parent() {
        // 父目录不存在时 SQLite 无法创建文件
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let db_url = format!("sqlite://{}", db_path.to_string_lossy());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        // 删除用户时级联删除任务和会话依赖外键
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    tracing::info!(path = %db_path.display(), max_connections, "Database ready");
    Ok(pool)
}
