//! Auth handlers: register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use clinic_auth::Identity;
use clinic_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, RegisterResponse};
use crate::extractors::{AuthUser, BearerToken, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), AppError> {
    let user = state.auth_service.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(RegisterResponse { user: user.into() })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let result = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(result.into())))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    token: BearerToken,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .auth_service
        .logout(token.as_str(), auth.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<Identity>> {
    Json(ApiResponse::ok(auth.0))
}
