use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use ember_shared::errors::{AppError, AppResult, ErrorCode};
use ember_shared::types::api::ApiResponse;

use crate::models::User;
use crate::store::Store;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "display name must be 3-50 characters"))]
    pub display_name: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

/// POST /users - create a user (collaborator boundary; no credential logic)
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    req.validate()
        .map_err(|e| AppError::new(ErrorCode::InvalidDisplayName, e.to_string()))?;

    if state.store.display_name_exists(&req.display_name).await? {
        return Err(AppError::new(
            ErrorCode::DisplayNameTaken,
            "display name already taken",
        ));
    }

    let user = state
        .store
        .create_user(req.display_name, req.bio, req.photo_url)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = state
        .store
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound, "user not found"))?;

    Ok(Json(ApiResponse::ok(user)))
}
