//! 看板状态
//!
//! 任务按状态分成三列（pending / in-progress / completed）。列内顺序与
//! 任务列表一致（新创建的在前）。拖拽换列先在本地生效，再根据服务端结果
//! `commit` 或 `rollback`。

use serde::Serialize;

use crate::db::{TaskRecord, TaskStatus};

/// 单列视图
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<TaskRecord>,
}

/// 需要发送给 `PUT /api/tasks/{id}` 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// 已在本地生效、等待服务端确认的移动
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub task_id: String,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl PendingMove {
    pub fn request(&self) -> StatusUpdate {
        StatusUpdate { status: self.to }
    }
}

/// 删除前的确认步骤。只有 `confirm` 之后才会得到要删除的任务 ID
#[derive(Debug)]
#[must_use]
pub struct DeleteConfirmation {
    task_id: String,
    pub title: String,
}

impl DeleteConfirmation {
    pub fn confirm(self) -> String {
        self.task_id
    }

    pub fn cancel(self) {}
}

#[derive(Debug, Default, Clone)]
pub struct Board {
    tasks: Vec<TaskRecord>,
}

impl Board {
    pub fn from_tasks(tasks: impl IntoIterator<Item = TaskRecord>) -> Self {
        Self {
            tasks: tasks.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, task_id: &str) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    pub fn column(&self, status: TaskStatus) -> Vec<&TaskRecord> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// 三列按流程顺序返回
    pub fn columns(&self) -> Vec<BoardColumn> {
        TaskStatus::ALL
            .into_iter()
            .map(|status| BoardColumn {
                status,
                tasks: self.column(status).into_iter().cloned().collect(),
            })
            .collect()
    }

    /// 拖拽结束时的落点。不是三列之一（例如落在卡片或空白处）时返回 None
    pub fn drop_target(raw: &str) -> Option<TaskStatus> {
        TaskStatus::parse(raw)
    }

    /// 乐观移动：立即修改本地状态，返回需要提交的变更。
    /// 任务不存在或已在目标列时不产生请求
    pub fn begin_move(&mut self, task_id: &str, to: TaskStatus) -> Option<PendingMove> {
        let task = self.tasks.iter_mut().find(|t| t.task_id == task_id)?;
        if task.status == to {
            return None;
        }
        let from = task.status;
        task.status = to;
        Some(PendingMove {
            task_id: task_id.to_string(),
            from,
            to,
        })
    }

    /// 服务端确认后，用返回的任务替换本地副本
    pub fn commit(&mut self, pending: PendingMove, task: TaskRecord) {
        debug_assert_eq!(pending.task_id, task.task_id);
        self.upsert(task);
    }

    /// 请求失败时恢复原列。期间任务已被其他操作改动则保持不变
    pub fn rollback(&mut self, pending: PendingMove) {
        if let Some(task) = self
            .tasks
            .iter_mut()
            .find(|t| t.task_id == pending.task_id && t.status == pending.to)
        {
            task.status = pending.from;
        }
    }

    /// 创建/编辑后更新本地列表；新任务放在最前
    pub fn upsert(&mut self, task: TaskRecord) {
        match self.tasks.iter_mut().find(|t| t.task_id == task.task_id) {
            Some(existing) => *existing = task,
            None => self.tasks.insert(0, task),
        }
    }

    pub fn request_delete(&self, task_id: &str) -> Option<DeleteConfirmation> {
        self.get(task_id).map(|task| DeleteConfirmation {
            task_id: task.task_id.clone(),
            title: task.title.clone(),
        })
    }

    pub fn remove(&mut self, task_id: &str) -> Option<TaskRecord> {
        let index = self.tasks.iter().position(|t| t.task_id == task_id)?;
        Some(self.tasks.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: TaskStatus) -> TaskRecord {
        TaskRecord {
            task_id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("task {}", id),
            description: String::new(),
            status,
            due_date: "2024-01-15T00:00:00.000Z".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn sample() -> Board {
        Board::from_tasks(vec![
            task("a", TaskStatus::Pending),
            task("b", TaskStatus::InProgress),
            task("c", TaskStatus::Pending),
            task("d", TaskStatus::Completed),
        ])
    }

    fn ids(board: &Board, status: TaskStatus) -> Vec<String> {
        board
            .column(status)
            .into_iter()
            .map(|t| t.task_id.clone())
            .collect()
    }

    #[test]
    fn groups_into_three_columns_in_order() {
        let board = sample();
        let columns = board.columns();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].status, TaskStatus::Pending);
        assert_eq!(columns[1].status, TaskStatus::InProgress);
        assert_eq!(columns[2].status, TaskStatus::Completed);
        assert_eq!(ids(&board, TaskStatus::Pending), vec!["a", "c"]);
        assert_eq!(columns[2].tasks.len(), 1);
    }

    #[test]
    fn move_is_applied_optimistically() {
        let mut board = sample();
        let pending = board.begin_move("a", TaskStatus::Completed).unwrap();
        assert_eq!(pending.from, TaskStatus::Pending);
        assert_eq!(
            pending.request(),
            StatusUpdate {
                status: TaskStatus::Completed
            }
        );
        assert_eq!(ids(&board, TaskStatus::Pending), vec!["c"]);
        assert_eq!(ids(&board, TaskStatus::Completed), vec!["a", "d"]);
    }

    #[test]
    fn move_to_same_column_or_unknown_task_is_noop() {
        let mut board = sample();
        assert!(board.begin_move("b", TaskStatus::InProgress).is_none());
        assert!(board.begin_move("zzz", TaskStatus::Completed).is_none());
    }

    #[test]
    fn rollback_restores_original_column() {
        let mut board = sample();
        let pending = board.begin_move("c", TaskStatus::InProgress).unwrap();
        board.rollback(pending);
        assert_eq!(ids(&board, TaskStatus::Pending), vec!["a", "c"]);
        assert_eq!(ids(&board, TaskStatus::InProgress), vec!["b"]);
    }

    #[test]
    fn commit_takes_server_copy() {
        let mut board = sample();
        let pending = board.begin_move("a", TaskStatus::InProgress).unwrap();
        let mut server = task("a", TaskStatus::InProgress);
        server.updated_at = "2024-02-01T00:00:00.000Z".to_string();
        board.commit(pending, server);
        assert_eq!(
            board.get("a").unwrap().updated_at,
            "2024-02-01T00:00:00.000Z"
        );
    }

    #[test]
    fn drop_target_only_accepts_columns() {
        assert_eq!(Board::drop_target("completed"), Some(TaskStatus::Completed));
        assert_eq!(Board::drop_target("task-42"), None);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut board = sample();
        board.request_delete("b").unwrap().cancel();
        assert_eq!(board.len(), 4);

        let confirmation = board.request_delete("b").unwrap();
        assert_eq!(confirmation.title, "task b");
        let id = confirmation.confirm();
        assert!(board.remove(&id).is_some());
        assert!(board.get("b").is_none());
        assert!(board.request_delete("b").is_none());
    }

    #[test]
    fn upsert_puts_new_tasks_first() {
        let mut board = sample();
        board.upsert(task("e", TaskStatus::Pending));
        assert_eq!(ids(&board, TaskStatus::Pending), vec!["e", "a", "c"]);
    }
}
