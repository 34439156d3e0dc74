use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use ember_shared::errors::AppResult;

use crate::matching::pair::CanonicalPair;
use crate::models::{Direction, Match, Message, Swipe, User};
use crate::store::{FoundOrCreated, Store};

/// In-memory store backing the test suite. One mutex covers all tables, so
/// `find_or_create_match` is atomic the same way the database's unique
/// constraint makes the Postgres version atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    swipes: Vec<Swipe>,
    matches: Vec<Match>,
    messages: Vec<Message>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of swipe events on record; lets tests assert that rejected
    /// input never reached the ledger.
    pub fn swipe_count(&self) -> usize {
        self.inner.lock().unwrap().swipes.len()
    }

    /// Appends a message with an explicit timestamp, bypassing the clock,
    /// so ordering under equal timestamps can be exercised.
    pub fn append_message_at(
        &self,
        match_id: Uuid,
        sender_id: Uuid,
        content: &str,
        sent_at: DateTime<Utc>,
    ) -> Message {
        let message = Message {
            id: Uuid::now_v7(),
            match_id,
            sender_id,
            content: content.to_string(),
            sent_at,
        };
        self.inner.lock().unwrap().messages.push(message.clone());
        message
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn record_swipe(
        &self,
        swiper_id: Uuid,
        target_id: Uuid,
        direction: Direction,
    ) -> AppResult<()> {
        let mut tables = self.inner.lock().unwrap();
        tables.swipes.push(Swipe {
            id: Uuid::now_v7(),
            swiper_id,
            target_id,
            direction: direction.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn has_right_swipe(&self, swiper_id: Uuid, target_id: Uuid) -> AppResult<bool> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.swipes.iter().any(|s| {
            s.swiper_id == swiper_id
                && s.target_id == target_id
                && s.direction == Direction::Right.to_string()
        }))
    }

    async fn find_or_create_match(&self, pair: CanonicalPair) -> AppResult<FoundOrCreated> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(existing) = tables
            .matches
            .iter()
            .find(|m| m.low_id == pair.low() && m.high_id == pair.high())
        {
            return Ok(FoundOrCreated::Existing(existing.clone()));
        }
        let created = Match {
            id: Uuid::now_v7(),
            low_id: pair.low(),
            high_id: pair.high(),
            matched_at: Utc::now(),
        };
        tables.matches.push(created.clone());
        Ok(FoundOrCreated::Created(created))
    }

    async fn get_match(&self, match_id: Uuid) -> AppResult<Option<Match>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.matches.iter().find(|m| m.id == match_id).cloned())
    }

    async fn list_matches_for_user(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Match>, u64)> {
        let tables = self.inner.lock().unwrap();
        let mut involving: Vec<Match> = tables
            .matches
            .iter()
            .filter(|m| m.has_participant(user_id))
            .cloned()
            .collect();
        involving.sort_by(|a, b| b.matched_at.cmp(&a.matched_at));
        let total = involving.len() as u64;
        let items = involving
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((items, total))
    }

    async fn append_message(
        &self,
        match_id: Uuid,
        sender_id: Uuid,
        content: String,
    ) -> AppResult<Message> {
        let message = Message {
            id: Uuid::now_v7(),
            match_id,
            sender_id,
            content,
            sent_at: Utc::now(),
        };
        self.inner.lock().unwrap().messages.push(message.clone());
        Ok(message)
    }

    async fn list_messages(
        &self,
        match_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Message>, u64)> {
        let tables = self.inner.lock().unwrap();
        let mut log: Vec<Message> = tables
            .messages
            .iter()
            .filter(|m| m.match_id == match_id)
            .cloned()
            .collect();
        // Stable sort: equal timestamps keep insertion order.
        log.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));
        let total = log.len() as u64;
        let items = log
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((items, total))
    }

    async fn create_user(
        &self,
        display_name: String,
        bio: Option<String>,
        photo_url: Option<String>,
    ) -> AppResult<User> {
        let user = User {
            id: Uuid::now_v7(),
            display_name,
            bio,
            photo_url,
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().any(|u| u.id == user_id))
    }

    async fn display_name_exists(&self, display_name: &str) -> AppResult<bool> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.users.iter().any(|u| u.display_name == display_name))
    }
}
