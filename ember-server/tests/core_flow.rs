use std::sync::Arc;

use uuid::Uuid;

use ember_server::chat;
use ember_server::matching::resolver::{resolve_swipe, SwipeOutcome};
use ember_server::models::Direction;
use ember_server::store::memory::MemoryStore;
use ember_shared::errors::ErrorCode;
use ember_shared::types::pagination::PaginationParams;

/// The full first-contact flow: one-sided right swipe, reciprocation,
/// idempotent re-swipe, chat gating, and ordered messaging.
#[tokio::test]
async fn first_contact_flow() {
    let store = MemoryStore::new();
    let alice = Uuid::now_v7();
    let bob = Uuid::now_v7();
    let eve = Uuid::now_v7();

    // Alice swipes right on Bob: no reciprocity yet.
    let outcome = resolve_swipe(&store, alice, bob, Direction::Right)
        .await
        .unwrap();
    assert!(matches!(outcome, SwipeOutcome::NoReciprocity));

    // Bob swipes right back: a match with canonical (low, high) identity.
    let outcome = resolve_swipe(&store, bob, alice, Direction::Right)
        .await
        .unwrap();
    let matched = match outcome {
        SwipeOutcome::NewMatch(m) => m,
        other => panic!("expected NewMatch, got {other:?}"),
    };
    assert_eq!(matched.low_id, alice.min(bob));
    assert_eq!(matched.high_id, alice.max(bob));

    // Alice swipes right again: same match, no duplicate.
    let outcome = resolve_swipe(&store, alice, bob, Direction::Right)
        .await
        .unwrap();
    assert_eq!(outcome.match_id(), Some(matched.id));
    assert!(matches!(outcome, SwipeOutcome::AlreadyMatched(_)));

    // Eve is not a participant and is denied both read and write.
    let err = chat::list_messages(&store, matched.id, eve, &PaginationParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotMatchParticipant);
    let err = chat::send_message(&store, matched.id, eve, "hey")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotMatchParticipant);

    // Participants chat; the log comes back in send order.
    chat::send_message(&store, matched.id, alice, "hi").await.unwrap();
    chat::send_message(&store, matched.id, bob, "hello").await.unwrap();

    let page = chat::list_messages(&store, matched.id, bob, &PaginationParams::default())
        .await
        .unwrap();
    let contents: Vec<&str> = page.items.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["hi", "hello"]);
}

#[tokio::test]
async fn reciprocity_holds_in_either_temporal_order() {
    for flip in [false, true] {
        let store = MemoryStore::new();
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let (first, second) = if flip { (b, a) } else { (a, b) };

        resolve_swipe(&store, first, second, Direction::Right)
            .await
            .unwrap();
        let outcome = resolve_swipe(&store, second, first, Direction::Right)
            .await
            .unwrap();

        let m = match outcome {
            SwipeOutcome::NewMatch(m) => m,
            other => panic!("expected NewMatch, got {other:?}"),
        };
        assert_eq!((m.low_id, m.high_id), (a.min(b), a.max(b)));
    }
}

#[tokio::test]
async fn left_swipes_never_create_matches() {
    let store = MemoryStore::new();
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();

    resolve_swipe(&store, a, b, Direction::Left).await.unwrap();
    resolve_swipe(&store, b, a, Direction::Left).await.unwrap();
    let outcome = resolve_swipe(&store, a, b, Direction::Right).await.unwrap();

    // Only a's right swipe is on record; b's left does not count.
    assert!(matches!(outcome, SwipeOutcome::NoReciprocity));
}

/// N tasks race to complete the reciprocity condition on the same pair;
/// exactly one wins the insert, everyone agrees on the id.
#[tokio::test]
async fn racing_reciprocal_swipes_agree_on_one_match() {
    let store = Arc::new(MemoryStore::new());
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();

    resolve_swipe(store.as_ref(), a, b, Direction::Right)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..32 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            resolve_swipe(store.as_ref(), b, a, Direction::Right)
                .await
                .unwrap()
        }));
    }

    let mut winners = 0;
    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        let outcome = handle.await.unwrap();
        assert!(outcome.matched());
        if matches!(outcome, SwipeOutcome::NewMatch(_)) {
            winners += 1;
        }
        ids.insert(outcome.match_id().unwrap());
    }

    assert_eq!(winners, 1);
    assert_eq!(ids.len(), 1);
}
