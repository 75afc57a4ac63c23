// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{
        ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
        UserResponse,
    },
};
use crate::extract::ApiJson;
use crate::models::MessageResponse;
use crate::state::AppState;

/// Register a new user
/// POST /api/v1/auth/register
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let user = state.auth_service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "You registered successfully. Please login.".to_string(),
            user,
        }),
    ))
}

/// Login a user
/// POST /api/v1/auth/login
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}

/// Revoke the caller's token
/// POST /api/v1/auth/logout
pub async fn logout_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<MessageResponse>, AuthError> {
    state.auth_service.logout(&user.token).await?;
    info!(user_id = user.user_id, "User logged out");

    Ok(Json(MessageResponse::new("You logged out successfully.")))
}

/// Reset a forgotten password using the security question
/// POST /api/v1/auth/change_password
pub async fn change_password_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    state.auth_service.change_password(request).await?;
    Ok(Json(MessageResponse::new("Your password has been reset.")))
}

/// Get current user information (protected endpoint)
/// GET /api/v1/auth/me
pub async fn me_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, AuthError> {
    let user = state.auth_service.get_current_user(user.user_id).await?;
    Ok(Json(user))
}
