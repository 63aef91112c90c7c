//! 数据库输入类型定义（用于插入/更新）

use super::enums::TaskStatus;

/// 新建任务输入
pub struct NewTask<'a> {
    pub task_id: &'a str,
    pub user_id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub due_date: &'a str,
    pub created_at: &'a str,
}

/// 任务的部分更新，None 表示保持原值
#[derive(Debug, Default)]
pub struct TaskChanges<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<&'a str>,
}

impl TaskChanges<'_> {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

/// 新建用户输入
pub struct NewUser<'a> {
    pub user_id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: &'a str,
}

/// 用户资料的部分更新
#[derive(Debug, Default)]
pub struct UserChanges<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: Option<&'a str>,
}

/// 新建会话输入
pub struct NewSession<'a> {
    pub token_hash: &'a str,
    pub user_id: &'a str,
    pub created_at: &'a str,
    pub expires_at: &'a str,
}
