use uuid::Uuid;

use ember_shared::errors::AppResult;

use crate::models::{Direction, Match};
use crate::store::{FoundOrCreated, Store};

use super::pair::CanonicalPair;

/// Outcome of running one swipe through the resolver.
#[derive(Debug, Clone)]
pub enum SwipeOutcome {
    /// The swipe was a left; no match is possible from it.
    NotRight,
    /// A right swipe with no right swipe on record in the other direction.
    NoReciprocity,
    /// Reciprocity held but the pair was already matched.
    AlreadyMatched(Match),
    /// Reciprocity held and this call created the match.
    NewMatch(Match),
}

impl SwipeOutcome {
    pub fn matched(&self) -> bool {
        matches!(self, Self::AlreadyMatched(_) | Self::NewMatch(_))
    }

    pub fn match_id(&self) -> Option<Uuid> {
        match self {
            Self::AlreadyMatched(m) | Self::NewMatch(m) => Some(m.id),
            _ => None,
        }
    }
}

/// Records the swipe and resolves it to an outcome.
///
/// The swipe is persisted unconditionally before any match logic runs; a
/// storage failure after that point is recoverable because matching is
/// recomputed from ledger state on the next attempt, never cached.
pub async fn resolve_swipe<S: Store + ?Sized>(
    store: &S,
    swiper_id: Uuid,
    target_id: Uuid,
    direction: Direction,
) -> AppResult<SwipeOutcome> {
    // Self-swipes are rejected at the boundary; computing the pair first
    // keeps the invariant even for callers that skip validation, and it
    // runs before the ledger write.
    let pair = CanonicalPair::new(swiper_id, target_id)?;

    store.record_swipe(swiper_id, target_id, direction).await?;

    if direction != Direction::Right {
        return Ok(SwipeOutcome::NotRight);
    }

    // Did the target previously swipe right on the swiper?
    if !store.has_right_swipe(target_id, swiper_id).await? {
        return Ok(SwipeOutcome::NoReciprocity);
    }

    match store.find_or_create_match(pair).await? {
        FoundOrCreated::Created(m) => {
            tracing::info!(match_id = %m.id, low = %m.low_id, high = %m.high_id, "new match");
            Ok(SwipeOutcome::NewMatch(m))
        }
        FoundOrCreated::Existing(m) => Ok(SwipeOutcome::AlreadyMatched(m)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn users() -> (Uuid, Uuid) {
        (Uuid::now_v7(), Uuid::now_v7())
    }

    #[tokio::test]
    async fn left_swipe_never_matches() {
        let store = MemoryStore::new();
        let (a, b) = users();

        resolve_swipe(&store, b, a, Direction::Right).await.unwrap();
        let outcome = resolve_swipe(&store, a, b, Direction::Left).await.unwrap();

        assert!(matches!(outcome, SwipeOutcome::NotRight));
        assert!(!outcome.matched());
    }

    #[tokio::test]
    async fn right_without_reciprocity() {
        let store = MemoryStore::new();
        let (a, b) = users();

        let outcome = resolve_swipe(&store, a, b, Direction::Right).await.unwrap();

        assert!(matches!(outcome, SwipeOutcome::NoReciprocity));
        assert_eq!(store.swipe_count(), 1);
    }

    #[tokio::test]
    async fn reciprocity_creates_one_canonical_match() {
        let store = MemoryStore::new();
        let (a, b) = users();

        resolve_swipe(&store, a, b, Direction::Right).await.unwrap();
        let outcome = resolve_swipe(&store, b, a, Direction::Right).await.unwrap();

        let m = match outcome {
            SwipeOutcome::NewMatch(m) => m,
            other => panic!("expected NewMatch, got {other:?}"),
        };
        assert_eq!(m.low_id, a.min(b));
        assert_eq!(m.high_id, a.max(b));
    }

    #[tokio::test]
    async fn resubmitting_returns_same_match() {
        let store = MemoryStore::new();
        let (a, b) = users();

        resolve_swipe(&store, a, b, Direction::Right).await.unwrap();
        let first = resolve_swipe(&store, b, a, Direction::Right).await.unwrap();
        let second = resolve_swipe(&store, a, b, Direction::Right).await.unwrap();

        let id = first.match_id().unwrap();
        match second {
            SwipeOutcome::AlreadyMatched(m) => assert_eq!(m.id, id),
            other => panic!("expected AlreadyMatched, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn self_swipe_rejected_before_ledger_write() {
        let store = MemoryStore::new();
        let a = Uuid::now_v7();

        let err = resolve_swipe(&store, a, a, Direction::Right).await;

        assert!(err.is_err());
        assert_eq!(store.swipe_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_reciprocal_swipes_create_exactly_one_match() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let (a, b) = users();

        // Right swipes in both directions are already on record, so every
        // concurrent call below observes reciprocity and races on
        // find-or-create.
        store.record_swipe(a, b, Direction::Right).await.unwrap();
        store.record_swipe(b, a, Direction::Right).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            let (swiper, target) = if i % 2 == 0 { (a, b) } else { (b, a) };
            handles.push(tokio::spawn(async move {
                resolve_swipe(store.as_ref(), swiper, target, Direction::Right)
                    .await
                    .unwrap()
            }));
        }

        let mut created = 0;
        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            let outcome = handle.await.unwrap();
            assert!(outcome.matched());
            if let SwipeOutcome::NewMatch(_) = outcome {
                created += 1;
            }
            ids.insert(outcome.match_id().unwrap());
        }

        assert_eq!(created, 1);
        assert_eq!(ids.len(), 1);
    }
}
