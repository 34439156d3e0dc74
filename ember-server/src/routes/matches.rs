use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use ember_shared::errors::{AppError, AppResult, ErrorCode};
use ember_shared::types::api::ApiResponse;
use ember_shared::types::pagination::{Paginated, PaginationParams};

use crate::store::Store;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListMatchesParams {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PartnerSummary {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchListItem {
    pub match_id: Uuid,
    pub matched_at: DateTime<Utc>,
    pub other: PartnerSummary,
}

/// GET /matches?user_id= - matches for a user, most recent first
pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListMatchesParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Paginated<MatchListItem>>>> {
    if !state.store.user_exists(params.user_id).await? {
        return Err(AppError::new(ErrorCode::UserNotFound, "user not found"));
    }

    let (matches, total) = state
        .store
        .list_matches_for_user(params.user_id, pagination.offset(), pagination.limit())
        .await?;

    let mut items = Vec::with_capacity(matches.len());
    for m in matches {
        // partner_of is Some by construction: every listed match involves the user
        let partner_id = m.partner_of(params.user_id).unwrap_or(params.user_id);
        let partner = state.store.get_user(partner_id).await?;
        items.push(MatchListItem {
            match_id: m.id,
            matched_at: m.matched_at,
            other: PartnerSummary {
                id: partner_id,
                display_name: partner.as_ref().map(|u| u.display_name.clone()),
                photo_url: partner.as_ref().and_then(|u| u.photo_url.clone()),
            },
        });
    }

    Ok(Json(ApiResponse::ok(Paginated::new(items, total, &pagination))))
}
