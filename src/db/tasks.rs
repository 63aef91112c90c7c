use super::{DbPool, NewTask, TaskChanges, TaskRecord, TaskStatus};

/// SELECT 公共字段
pub(crate) const TASK_FIELDS: &str =
    "task_id, user_id, title, description, status, due_date, created_at, updated_at";

// <'_>: 让编译器自动推导生命周期
pub async fn insert_task(pool: &DbPool, params: NewTask<'_>) -> Result<TaskRecord, sqlx::Error> {
    // 状态显式写入 pending，不依赖 DB 默认值
    let sql = format!(
        "INSERT INTO tasks (task_id, user_id, title, description, status, due_date, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
        TASK_FIELDS
    );
    let task = sqlx::query_as::<_, TaskRecord>(&sql)
        .bind(params.task_id)
        .bind(params.user_id)
        .bind(params.title)
        .bind(params.description)
        .bind(TaskStatus::Pending)
        .bind(params.due_date)
        .bind(params.created_at)
        .bind(params.created_at)
        .fetch_one(pool)
        .await?;

    tracing::debug!(
        task_id = %task.task_id,
        user_id = %task.user_id,
        title = %task.title,
        due_date = %task.due_date,
        "Task created"
    );
    Ok(task)
}

pub async fn get_task_by_id(
    pool: &DbPool,
    task_id: &str,
) -> Result<Option<TaskRecord>, sqlx::Error> {
    let sql = format!("SELECT {} FROM tasks WHERE task_id = ?", TASK_FIELDS);
    sqlx::query_as::<_, TaskRecord>(&sql)
        .bind(task_id)
        .fetch_optional(pool)
        .await
}

/// 列出用户的任务，最新创建的在前；`status` 为 None 时不过滤
pub async fn list_tasks_for_user(
    pool: &DbPool,
    user_id: &str,
    status: Option<TaskStatus>,
) -> Result<Vec<TaskRecord>, sqlx::Error> {
    // 同一毫秒内创建的任务按插入顺序倒序
    let tasks = match status {
        Some(status) => {
            let sql = format!(
                "SELECT {} FROM tasks WHERE user_id = ? AND status = ? \
                 ORDER BY created_at DESC, rowid DESC",
                TASK_FIELDS
            );
            sqlx::query_as::<_, TaskRecord>(&sql)
                .bind(user_id)
                .bind(status)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                "SELECT {} FROM tasks WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
                TASK_FIELDS
            );
            sqlx::query_as::<_, TaskRecord>(&sql)
                .bind(user_id)
                .fetch_all(pool)
                .await?
        }
    };
    tracing::debug!(user_id, status = ?status, count = tasks.len(), "Tasks listed");
    Ok(tasks)
}

/// 部分更新：未提供的字段通过 COALESCE 保持原值，单条语句完成
pub async fn update_task(
    pool: &DbPool,
    task_id: &str,
    changes: TaskChanges<'_>,
    updated_at: &str,
) -> Result<Option<TaskRecord>, sqlx::Error> {
    let sql = format!(
        "UPDATE tasks SET \
            title = COALESCE(?, title), \
            description = COALESCE(?, description), \
            status = COALESCE(?, status), \
            due_date = COALESCE(?, due_date), \
            updated_at = ? \
         WHERE task_id = ? RETURNING {}",
        TASK_FIELDS
    );
    let task = sqlx::query_as::<_, TaskRecord>(&sql)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.status)
        .bind(changes.due_date)
        .bind(updated_at)
        .bind(task_id)
        .fetch_optional(pool)
        .await?;

    tracing::debug!(
        task_id,
        title = ?changes.title,
        status = ?changes.status,
        due_date = ?changes.due_date,
        found = task.is_some(),
        "Task updated"
    );
    Ok(task)
}

/// 物理删除任务，返回是否删除了记录
pub async fn delete_task(pool: &DbPool, task_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE task_id = ?")
        .bind(task_id)
        .execute(pool)
        .await?;
    tracing::debug!(task_id, rows = result.rows_affected(), "Task deleted");
    Ok(result.rows_affected() > 0)
}
