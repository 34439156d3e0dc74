use uuid::Uuid;

use ember_shared::errors::{AppError, AppResult, ErrorCode};
use ember_shared::types::pagination::{Paginated, PaginationParams};

use crate::models::{Match, Message};
use crate::store::Store;

/// Match membership gate. Every chat read and write goes through here
/// before touching the message log.
///
/// A missing match is a not-found failure; a known match with a
/// non-participant user is an authorization failure, kept distinct so the
/// caller never confuses the two.
pub async fn authorize<S: Store + ?Sized>(
    store: &S,
    match_id: Uuid,
    user_id: Uuid,
) -> AppResult<Match> {
    let matched = store
        .get_match(match_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MatchNotFound, "match not found"))?;

    if !matched.has_participant(user_id) {
        return Err(AppError::new(
            ErrorCode::NotMatchParticipant,
            "you are not a participant of this match",
        ));
    }

    Ok(matched)
}

pub async fn send_message<S: Store + ?Sized>(
    store: &S,
    match_id: Uuid,
    sender_id: Uuid,
    content: &str,
) -> AppResult<Message> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::new(
            ErrorCode::EmptyMessage,
            "message content must not be empty",
        ));
    }

    authorize(store, match_id, sender_id).await?;

    store
        .append_message(match_id, sender_id, content.to_string())
        .await
}

/// Messages of a match, ascending by (sent_at, id). A pure read; no cursor
/// state is retained between calls.
pub async fn list_messages<S: Store + ?Sized>(
    store: &S,
    match_id: Uuid,
    user_id: Uuid,
    params: &PaginationParams,
) -> AppResult<Paginated<Message>> {
    authorize(store, match_id, user_id).await?;

    let (items, total) = store
        .list_messages(match_id, params.offset(), params.limit())
        .await?;

    Ok(Paginated::new(items, total, params))
}
