//! 命令类型模块
//!
//! 拆分为三个子模块：
//! - `task`: 任务相关类型
//! - `user`: 注册、登录与个人资料相关类型
//! - `common`: 通用类型

mod common;
mod task;
mod user;

// 导出任务相关类型
pub use task::{
    BoardResponse, CreateTaskRequest, ListTasksQuery, TaskListResponse, TaskMutationResponse,
    TaskResponse, UpdateTaskRequest,
};

// 导出用户相关类型
pub use user::{
    LoginRequest, LoginResponse, ProfileResponse, ProfileUpdatedResponse, RegisterRequest,
    UpdateProfileRequest,
};

// 导出通用类型
pub use common::{ApiJson, HealthResponse, MessageResponse};
