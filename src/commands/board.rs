use axum::extract::State;
use axum::Json;

use crate::{app_state::AppState, auth::AuthUser, board::Board, db::list_tasks_for_user, AppResult};

use super::BoardResponse;

/// GET /api/board
pub async fn get_board(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<BoardResponse>> {
    let tasks = list_tasks_for_user(&state.db, &user.user_id, None).await?;
    let board = Board::from_tasks(tasks);
    Ok(Json(BoardResponse {
        columns: board.columns(),
    }))
}
