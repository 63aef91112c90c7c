//! 通用命令类型

use axum::extract::FromRequest;
use serde::Serialize;

use crate::error::AppError;

/// JSON 请求体提取器：解析失败时返回 `{"error": "Invalid request body"}`，
/// 而不是 axum 默认的纯文本
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
