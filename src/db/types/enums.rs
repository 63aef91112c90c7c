//! 数据库枚举类型定义

use serde::{Deserialize, Serialize};
use sqlx::Type;

/// 任务状态：pending -> in-progress -> completed
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Type, Serialize, Deserialize)]
pub enum TaskStatus {
    #[sqlx(rename = "pending")]
    #[serde(rename = "pending")]
    Pending,
    #[sqlx(rename = "in-progress")]
    #[serde(rename = "in-progress")]
    InProgress,
    #[sqlx(rename = "completed")]
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    /// 看板列顺序
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// 未知取值返回 None，由调用方决定是忽略还是报错
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
