use async_trait::async_trait;
use uuid::Uuid;

use ember_shared::errors::AppResult;

use crate::matching::pair::CanonicalPair;
use crate::models::{Direction, Match, Message, User};

pub mod memory;
pub mod pg;

/// Result of the atomic find-or-create on the match store.
#[derive(Debug, Clone)]
pub enum FoundOrCreated {
    Created(Match),
    Existing(Match),
}

impl FoundOrCreated {
    pub fn into_match(self) -> Match {
        match self {
            Self::Created(m) | Self::Existing(m) => m,
        }
    }
}

/// Storage operations the core depends on. Every method is asynchronous and
/// fallible; the storage engine is the single source of truth and nothing
/// is cached in memory on top of it.
#[async_trait]
pub trait Store: Send + Sync {
    // --- swipe ledger ---

    /// Appends a swipe event unconditionally; prior events for the same
    /// ordered pair are never deduplicated or superseded.
    async fn record_swipe(
        &self,
        swiper_id: Uuid,
        target_id: Uuid,
        direction: Direction,
    ) -> AppResult<()>;

    /// True iff at least one right-swipe event from `swiper_id` to
    /// `target_id` is on record.
    async fn has_right_swipe(&self, swiper_id: Uuid, target_id: Uuid) -> AppResult<bool>;

    // --- match store ---

    /// Atomic find-or-create keyed on the canonical pair. Concurrent calls
    /// for the same pair must resolve to a single row: one caller observes
    /// `Created`, every other caller observes `Existing` with the same id.
    async fn find_or_create_match(&self, pair: CanonicalPair) -> AppResult<FoundOrCreated>;

    async fn get_match(&self, match_id: Uuid) -> AppResult<Option<Match>>;

    /// Matches involving `user_id`, most recent first.
    async fn list_matches_for_user(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Match>, u64)>;

    // --- message log ---

    /// Appends a message. Participation and content checks happen in the
    /// chat layer before this is called.
    async fn append_message(
        &self,
        match_id: Uuid,
        sender_id: Uuid,
        content: String,
    ) -> AppResult<Message>;

    /// Messages of a match ascending by (sent_at, id). A pure read, safe to
    /// call repeatedly.
    async fn list_messages(
        &self,
        match_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Message>, u64)>;

    // --- user directory (collaborator boundary) ---

    async fn create_user(
        &self,
        display_name: String,
        bio: Option<String>,
        photo_url: Option<String>,
    ) -> AppResult<User>;

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>>;

    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool>;

    async fn display_name_exists(&self, display_name: &str) -> AppResult<bool>;
}
