mod app_state;
pub mod auth;
pub mod board;
pub mod commands;
pub mod config;
pub mod db;
mod error;
pub mod routes;
pub mod utils;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use app_state::AppState;
pub use config::AppConfig;
pub use error::{AppError, AppResult, ResultExt};
pub use routes::create_router;

const DEFAULT_LOG_FILTER: &str = "info,taskboard_lib=debug,tower_http=debug";

/// 根据配置打开数据库并构建共享状态
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let pool = db::init_pool_with(&config.database_path, config.max_connections).await?;
    Ok(AppState::new(pool, config))
}

pub fn init_tracing() {
    // RUST_LOG 优先；重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// 服务入口：加载配置、初始化数据库、启动 HTTP 服务直到收到 Ctrl+C
pub async fn run() -> AppResult<()> {
    init_tracing();

    let config = AppConfig::load()?;
    tracing::info!(
        bind = %config.bind_address(),
        database = %config.database_path.display(),
        session_ttl_hours = config.session_ttl_hours,
        "Configuration loaded"
    );

    let bind_address = config.bind_address();
    let state = build_state(config).await?;
    let app = create_router(state);

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Taskboard listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Taskboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
