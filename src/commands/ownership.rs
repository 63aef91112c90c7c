//! 任务所有权校验
//!
//! 所有读取单个任务或修改任务的接口在执行前都要先通过这里。

use crate::db::{get_task_by_id, DbPool, TaskRecord};
use crate::error::{AppError, AppResult};

/// 校验结果
#[derive(Debug)]
pub enum TaskAccess {
    NotFound,
    /// 任务存在但属于其他用户
    Forbidden,
    Owned(TaskRecord),
}

impl TaskAccess {
    /// NotFound -> 404，Forbidden -> 401
    pub fn into_result(self, task_id: &str) -> AppResult<TaskRecord> {
        match self {
            TaskAccess::Owned(task) => Ok(task),
            TaskAccess::NotFound => Err(AppError::NotFound {
                entity: "Task",
                id: task_id.to_string(),
            }),
            TaskAccess::Forbidden => Err(AppError::Forbidden),
        }
    }
}

pub async fn check_task_access(pool: &DbPool, task_id: &str, user_id: &str) -> AppResult<TaskAccess> {
    let access = match get_task_by_id(pool, task_id).await? {
        None => TaskAccess::NotFound,
        Some(task) if task.user_id != user_id => {
            tracing::warn!(task_id, user_id, "Task access denied: owner mismatch");
            TaskAccess::Forbidden
        }
        Some(task) => TaskAccess::Owned(task),
    };
    Ok(access)
}

/// 取出调用者拥有的任务，否则返回对应错误
pub async fn require_owned_task(pool: &DbPool, task_id: &str, user_id: &str) -> AppResult<TaskRecord> {
    check_task_access(pool, task_id, user_id)
        .await?
        .into_result(task_id)
}
