use crate::config::AppConfig;
use crate::db::DbPool;
use std::sync::Arc;

/// 每个请求共享的状态：连接池 + 只读配置
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
