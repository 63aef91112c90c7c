//! 任务相关命令类型

use serde::{Deserialize, Serialize};

use crate::board::BoardColumn;
use crate::db::TaskRecord;

/// 列表过滤参数
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<String>,
}

/// 创建任务请求
///
/// 字段全部可选，缺失时由校验给出明确的错误消息；
/// 请求体中的 `status` 会被忽略，新任务总是 pending
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// 部分更新请求：缺失或为 null 的字段保持不变
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskRecord>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: TaskRecord,
}

/// 创建/更新响应
#[derive(Debug, Serialize)]
pub struct TaskMutationResponse {
    pub message: &'static str,
    pub task: TaskRecord,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub columns: Vec<BoardColumn>,
}
