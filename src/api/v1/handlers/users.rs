/*
 * Responsibility
 * - /users 系 handler (一覧 / 参照 / 部分更新 / 削除)
 * - 認可は routes 側の guard (route_layer) で済んでいる前提
 * - users は username をそのまま扱う
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::users::{UpdateUserRequest, UserResponse},
    error::AppError,
    repos::user_repo,
    state::AppState,
};

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = user_repo::list(&state.db).await?;

    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let row = user_repo::get(&state.db, &username)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(row.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_FAILED", msg))?;

    let changes = req.into_changes();
    tracing::debug!(username = %username, fields = changes.len(), "updating user");

    let row = user_repo::update(&state.db, &username, &changes)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(row.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    if user_repo::delete(&state.db, &username).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("user"))
    }
}
