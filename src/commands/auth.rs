use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::{create_session, expired_session_cookie, revoke_session, session_cookie, AuthUser},
    db::{get_user_by_email, insert_user, is_unique_violation, NewUser},
    error::{AppError, AppResult},
    utils::{
        crypto::{hash_password, verify_password},
        now_timestamp,
        validation::{validate_email, validate_name, validate_password},
    },
};

use super::{
    ApiJson, LoginRequest, LoginResponse, MessageResponse, ProfileUpdatedResponse,
    RegisterRequest,
};

const INVALID_LOGIN: &str = "Invalid email or password";

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ProfileUpdatedResponse>)> {
    let name = validate_name(payload.name.as_deref().unwrap_or_default())?;
    let email = validate_email(payload.email.as_deref().unwrap_or_default())?;
    let password = validate_password(payload.password.as_deref().unwrap_or_default())?;

    if get_user_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::Validation("Email already in use".to_string()));
    }

    let user_id = Uuid::new_v4().to_string();
    let password_hash = hash_password(password)?;
    let now = now_timestamp();
    let user = insert_user(
        &state.db,
        NewUser {
            user_id: &user_id,
            name,
            email: &email,
            password_hash: &password_hash,
            created_at: &now,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Validation("Email already in use".to_string())
        } else {
            e.into()
        }
    })?;

    tracing::info!(user_id = %user.user_id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(ProfileUpdatedResponse {
            message: "User created",
            user,
        }),
    ))
}

/// POST /api/auth/login
///
/// 邮箱不存在和密码错误返回相同的消息
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> AppResult<([(HeaderName, String); 1], Json<LoginResponse>)> {
    let email = payload.email.as_deref().unwrap_or_default().trim().to_lowercase();
    let password = payload.password.as_deref().unwrap_or_default();

    let user = get_user_by_email(&state.db, &email)
        .await?
        .ok_or(AppError::InvalidCredentials(INVALID_LOGIN))?;
    if !verify_password(password, &user.password_hash)? {
        tracing::debug!(user_id = %user.user_id, "Login rejected: wrong password");
        return Err(AppError::InvalidCredentials(INVALID_LOGIN));
    }

    let ttl = state.config.session_ttl()?;
    let session = create_session(&state.db, &user.user_id, ttl).await?;
    tracing::info!(user_id = %user.user_id, "User logged in");

    Ok((
        [(SET_COOKIE, session_cookie(&session.token, ttl))],
        Json(LoginResponse {
            token: session.token,
            expires_at: session.expires_at,
            user,
        }),
    ))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<([(HeaderName, String); 1], Json<MessageResponse>)> {
    revoke_session(&state.db, &user.token_hash).await?;
    Ok((
        [(SET_COOKIE, expired_session_cookie())],
        Json(MessageResponse {
            message: "Logged out",
        }),
    ))
}
