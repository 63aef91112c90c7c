//! 路由表
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /health | `health_check` |
//! | POST | /api/auth/register | `register` |
//! | POST | /api/auth/login | `login` |
//! | POST | /api/auth/logout | `logout` |
//! | GET, POST | /api/tasks | `list_tasks`, `create_task` |
//! | GET, PUT, DELETE | /api/tasks/{id} | `get_task`, `update_task_command`, `delete_task_command` |
//! | GET, PUT, DELETE | /api/users/profile | `get_profile`, `update_profile`, `delete_profile` |
//! | GET | /api/board | `get_board` |

use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::commands::{
    create_task, delete_profile, delete_task_command, get_board, get_profile, get_task,
    list_tasks, login, logout, register, update_profile, update_task_command, HealthResponse,
};
use crate::error::AppError;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found() -> AppError {
    AppError::NotFound {
        entity: "Route",
        id: String::new(),
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // 认证
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        // 任务
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task)
                .put(update_task_command)
                .delete(delete_task_command),
        )
        .route("/api/board", get(get_board))
        // 个人资料
        .route(
            "/api/users/profile",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
