//! User handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_kernel::UserId;

use crate::dto::user::{CreateUserRequest, UserResponse};
use crate::handlers::parse_id;
use crate::{error::ApiError, AppState};

/// Gets a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let user = state.users.find_by_id(id).await?;
    Ok(Json(user.into()))
}

/// Registers a user; the account number must be unused
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.users.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}
