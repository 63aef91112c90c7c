//! 统一错误类型定义
//!
//! 使用 `thiserror` 简化错误类型定义，
//! 提供 `AppError` 枚举和 `AppResult` 类型别名。
//! HTTP 层通过 `IntoResponse` 把错误统一渲染为 `{"error": "..."}`。

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// 应用级统一错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据库错误
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 迁移错误
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// 文件操作错误
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// 验证错误（输入参数不合法），消息直接返回给客户端
    #[error("{0}")]
    Validation(String),

    /// 没有会话或会话已失效
    #[error("Unauthorized")]
    Unauthenticated,

    /// 会话有效，但不是资源的所有者
    #[error("Unauthorized")]
    Forbidden,

    /// 登录或改密时密码校验失败
    #[error("{0}")]
    InvalidCredentials(&'static str),

    /// 资源未找到
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    /// 配置错误
    #[error("config error: {0}")]
    Config(String),

    /// 密码哈希失败
    #[error("password hash error: {0}")]
    PasswordHash(String),
}

// 请求体不是合法 JSON 或字段类型不对时，统一按校验错误返回
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        AppError::Validation("Invalid request body".to_string())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::Forbidden | AppError::InvalidCredentials(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Migrate(_)
            | AppError::Io(_)
            | AppError::Config(_)
            | AppError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给客户端的消息。内部错误只给出通用文案，细节写日志
    pub fn public_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::NotFound { entity, id } => {
                tracing::debug!(entity, id = %id, "Resource not found");
            }
            _ if status.is_server_error() => {
                tracing::error!(error = %self, "Request failed");
            }
            _ => {
                tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
            }
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// 应用级 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

// ========== 扩展 trait：为 Result 添加上下文方法 ==========

/// 为 Result 类型添加错误上下文转换方法
pub trait ResultExt<T> {
    /// 将错误转换为验证错误
    fn validation_err(self, msg: &str) -> AppResult<T>;

    /// 将错误转换为配置错误
    fn config_err(self, msg: &str) -> AppResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn validation_err(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| {
            tracing::debug!(error = %e, "{}", msg);
            AppError::Validation(msg.to_string())
        })
    }

    fn config_err(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Config(format!("{}: {}", msg, e)))
    }
}
