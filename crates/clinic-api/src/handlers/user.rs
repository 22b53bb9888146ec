//! Account management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::extract::rejection::QueryRejection;

use clinic_core::error::AppError;
use clinic_core::types::PageResponse;

use crate::dto::request::UpdateUserRequest;
use crate::dto::response::{ApiResponse, MessageResponse, RevocationResponse, UserResponse};
use crate::extractors::{AuthUser, ListUsersQuery, ValidatedJson, parse_user_id};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;

    let page = state
        .user_service
        .list(&auth, &query.page_request(), query.search())
        .await?;

    Ok(Json(ApiResponse::ok(page.map(UserResponse::from))))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let id = parse_user_id(&id)?;
    state.user_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User deleted successfully",
    ))))
}

/// GET /api/users/{id}/revocations
pub async fn list_revocations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<RevocationResponse>>>, AppError> {
    let id = parse_user_id(&id)?;
    let entries = state.user_service.list_revocations(&auth, id).await?;
    Ok(Json(ApiResponse::ok(
        entries.into_iter().map(RevocationResponse::from).collect(),
    )))
}
