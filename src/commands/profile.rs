use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderName;
use axum::Json;

use crate::{
    app_state::AppState,
    auth::{expired_session_cookie, AuthUser},
    db::{
        delete_user, email_taken_by_other, get_user_by_id, is_unique_violation, update_user,
        UserChanges, UserRecord,
    },
    error::{AppError, AppResult},
    utils::{
        crypto::{hash_password, verify_password},
        validation::{validate_email, validate_name, validate_password},
    },
};

use super::{
    ApiJson, MessageResponse, ProfileResponse, ProfileUpdatedResponse, UpdateProfileRequest,
};

/// 会话有效但用户已不存在时按未登录处理
async fn current_user(state: &AppState, user: &AuthUser) -> AppResult<UserRecord> {
    get_user_by_id(&state.db, &user.user_id)
        .await?
        .ok_or(AppError::Unauthenticated)
}

/// GET /api/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = current_user(&state, &user).await?;
    Ok(Json(ProfileResponse { user }))
}

/// PUT /api/users/profile
///
/// 设置新密码前必须用当前密码重新验证
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> AppResult<Json<ProfileUpdatedResponse>> {
    let existing = current_user(&state, &user).await?;

    let name = payload.name.as_deref().map(validate_name).transpose()?;
    let email = payload.email.as_deref().map(validate_email).transpose()?;
    if let Some(email) = email.as_deref() {
        if email_taken_by_other(&state.db, email, &existing.user_id).await? {
            return Err(AppError::Validation("Email already in use".to_string()));
        }
    }

    // 表单总会带上空字符串，空值视为未设置
    let new_password = payload.new_password.as_deref().filter(|p| !p.is_empty());
    let password_hash = match new_password {
        Some(new_password) => {
            let current_password = payload
                .current_password
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| {
                    AppError::Validation(
                        "Current password is required to set a new password".to_string(),
                    )
                })?;
            if !verify_password(current_password, &existing.password_hash)? {
                return Err(AppError::InvalidCredentials("Current password is incorrect"));
            }
            Some(hash_password(validate_password(new_password)?)?)
        }
        None => None,
    };

    let changes = UserChanges {
        name,
        email: email.as_deref(),
        password_hash: password_hash.as_deref(),
    };
    let updated = match update_user(&state.db, &existing.user_id, changes).await {
        Ok(updated) => updated.ok_or(AppError::Unauthenticated)?,
        // 并发注册抢占了同一个邮箱
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::Validation("Email already in use".to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        user_id = %updated.user_id,
        password_changed = password_hash.is_some(),
        "Profile updated"
    );
    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated",
        user: updated,
    }))
}

/// DELETE /api/users/profile
///
/// 任务和会话随用户级联删除
pub async fn delete_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<([(HeaderName, String); 1], Json<MessageResponse>)> {
    if !delete_user(&state.db, &user.user_id).await? {
        return Err(AppError::Unauthenticated);
    }
    tracing::info!(user_id = %user.user_id, "Account deleted");
    Ok((
        [(SET_COOKIE, expired_session_cookie())],
        Json(MessageResponse {
            message: "Account deleted",
        }),
    ))
}
