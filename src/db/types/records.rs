//! 数据库记录类型定义（FromRow）
//!
//! 记录直接作为 API 响应序列化：字段用 camelCase，主键对外叫 `id`，
//! 所有者和密码哈希不出现在响应里。

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::enums::TaskStatus;

/// 任务记录
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(rename = "id")]
    pub task_id: String,
    #[serde(skip_serializing, default)]
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 用户记录
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "id")]
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

/// 会话记录
#[derive(Debug, Clone, FromRow)]
pub struct SessionRecord {
    pub token_hash: String,
    pub user_id: String,
    pub created_at: String,
    pub expires_at: String,
}
