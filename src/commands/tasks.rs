use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::AuthUser,
    db::{delete_task, insert_task, list_tasks_for_user, update_task, NewTask, TaskChanges},
    error::{AppError, AppResult},
    utils::{
        now_timestamp,
        validation::{
            parse_due_date, parse_status, parse_status_filter, validate_description,
            validate_title,
        },
    },
};

use super::{
    require_owned_task, ApiJson, CreateTaskRequest, ListTasksQuery, MessageResponse,
    TaskListResponse, TaskMutationResponse, TaskResponse, UpdateTaskRequest,
};

/// GET /api/tasks?status=...
///
/// 非法的 status 过滤值直接忽略，返回全部任务
pub async fn list_tasks(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListTasksQuery>,
) -> AppResult<Json<TaskListResponse>> {
    let status = parse_status_filter(query.status.as_deref());
    let tasks = list_tasks_for_user(&state.db, &user.user_id, status).await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskMutationResponse>)> {
    let title = validate_title(payload.title.as_deref().unwrap_or_default())?;
    let description = validate_description(payload.description.as_deref().unwrap_or_default())?;
    let due_date = match payload.due_date.as_deref() {
        Some(raw) => parse_due_date(raw)?,
        None => return Err(AppError::Validation("Due date is required".to_string())),
    };

    let task_id = Uuid::new_v4().to_string();
    let now = now_timestamp();
    let task = insert_task(
        &state.db,
        NewTask {
            task_id: &task_id,
            user_id: &user.user_id,
            title,
            description,
            due_date: &due_date,
            created_at: &now,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskMutationResponse {
            message: "Task created",
            task,
        }),
    ))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<String>,
) -> AppResult<Json<TaskResponse>> {
    let task = require_owned_task(&state.db, &task_id, &user.user_id).await?;
    Ok(Json(TaskResponse { task }))
}

/// PUT /api/tasks/{id}
pub async fn update_task_command(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateTaskRequest>,
) -> AppResult<Json<TaskMutationResponse>> {
    let current = require_owned_task(&state.db, &task_id, &user.user_id).await?;

    let title = payload.title.as_deref().map(validate_title).transpose()?;
    let description = payload
        .description
        .as_deref()
        .map(validate_description)
        .transpose()?;
    let status = payload.status.as_deref().map(parse_status).transpose()?;
    let due_date = payload.due_date.as_deref().map(parse_due_date).transpose()?;

    let changes = TaskChanges {
        title,
        description,
        status,
        due_date: due_date.as_deref(),
    };
    if changes.is_empty() {
        return Ok(Json(TaskMutationResponse {
            message: "Task updated",
            task: current,
        }));
    }

    let task = update_task(&state.db, &task_id, changes, &now_timestamp())
        .await?
        // 校验与更新之间任务被删除
        .ok_or_else(|| AppError::NotFound {
            entity: "Task",
            id: task_id.clone(),
        })?;

    Ok(Json(TaskMutationResponse {
        message: "Task updated",
        task,
    }))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task_command(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    require_owned_task(&state.db, &task_id, &user.user_id).await?;
    delete_task(&state.db, &task_id).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted",
    }))
}
