use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use ember_shared::errors::{AppError, AppResult, ErrorCode};
use ember_shared::types::api::ApiResponse;

use crate::matching::resolver;
use crate::models::Direction;
use crate::store::Store;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SwipeRequest {
    pub swiper_id: Uuid,
    pub target_id: Uuid,
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
pub struct SwipeResponse {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<Uuid>,
}

/// POST /swipe - record a swipe and resolve it against the ledger
pub async fn swipe(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SwipeRequest>,
) -> AppResult<Json<ApiResponse<SwipeResponse>>> {
    if req.swiper_id == req.target_id {
        return Err(AppError::new(ErrorCode::SelfSwipe, "cannot swipe on yourself"));
    }

    if !state.store.user_exists(req.swiper_id).await? {
        return Err(AppError::new(ErrorCode::UserNotFound, "swiper not found"));
    }
    if !state.store.user_exists(req.target_id).await? {
        return Err(AppError::new(ErrorCode::UserNotFound, "target not found"));
    }

    let outcome =
        resolver::resolve_swipe(&state.store, req.swiper_id, req.target_id, req.direction).await?;

    tracing::debug!(
        swiper = %req.swiper_id,
        target = %req.target_id,
        direction = %req.direction,
        matched = outcome.matched(),
        "swipe resolved"
    );

    Ok(Json(ApiResponse::ok(SwipeResponse {
        matched: outcome.matched(),
        match_id: outcome.match_id(),
    })))
}
