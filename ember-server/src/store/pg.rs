use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use ember_shared::clients::db::DbPool;
use ember_shared::errors::{AppError, AppResult};

use crate::matching::pair::CanonicalPair;
use crate::models::{Direction, Match, Message, NewMatch, NewMessage, NewSwipe, NewUser, User};
use crate::schema::{matches, messages, swipes, users};
use crate::store::{FoundOrCreated, Store};

/// Postgres-backed store. Diesel is synchronous, so every operation runs on
/// the blocking pool and the scheduler threads never wait on I/O.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| AppError::internal(format!("database connection error: {e}")))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| AppError::internal(format!("blocking task failed: {e}")))?
    }
}

#[async_trait]
impl Store for PgStore {
    async fn record_swipe(
        &self,
        swiper_id: Uuid,
        target_id: Uuid,
        direction: Direction,
    ) -> AppResult<()> {
        self.with_conn(move |conn| {
            let row = NewSwipe {
                id: Uuid::now_v7(),
                swiper_id,
                target_id,
                direction: direction.to_string(),
                created_at: Utc::now(),
            };
            diesel::insert_into(swipes::table)
                .values(&row)
                .execute(conn)
                .map_err(AppError::Database)?;
            Ok(())
        })
        .await
    }

    async fn has_right_swipe(&self, swiper_id: Uuid, target_id: Uuid) -> AppResult<bool> {
        self.with_conn(move |conn| {
            swipes::table
                .filter(swipes::swiper_id.eq(swiper_id))
                .filter(swipes::target_id.eq(target_id))
                .filter(swipes::direction.eq(Direction::Right.to_string()))
                .select(count_star())
                .first::<i64>(conn)
                .map(|c| c > 0)
                .map_err(AppError::Database)
        })
        .await
    }

    async fn find_or_create_match(&self, pair: CanonicalPair) -> AppResult<FoundOrCreated> {
        self.with_conn(move |conn| {
            let row = NewMatch {
                id: Uuid::now_v7(),
                low_id: pair.low(),
                high_id: pair.high(),
                matched_at: Utc::now(),
            };

            // Single conditional insert; the unique constraint on
            // (low_id, high_id) is the arbiter under concurrent reciprocal
            // swipes. Never a separate existence check followed by an insert.
            let inserted: Option<Match> = diesel::insert_into(matches::table)
                .values(&row)
                .on_conflict((matches::low_id, matches::high_id))
                .do_nothing()
                .get_result(conn)
                .optional()
                .map_err(AppError::Database)?;

            match inserted {
                Some(m) => Ok(FoundOrCreated::Created(m)),
                None => matches::table
                    .filter(matches::low_id.eq(pair.low()))
                    .filter(matches::high_id.eq(pair.high()))
                    .first::<Match>(conn)
                    .map(FoundOrCreated::Existing)
                    .map_err(AppError::Database),
            }
        })
        .await
    }

    async fn get_match(&self, match_id: Uuid) -> AppResult<Option<Match>> {
        self.with_conn(move |conn| {
            matches::table
                .find(match_id)
                .first::<Match>(conn)
                .optional()
                .map_err(AppError::Database)
        })
        .await
    }

    async fn list_matches_for_user(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Match>, u64)> {
        self.with_conn(move |conn| {
            let total: i64 = matches::table
                .filter(matches::low_id.eq(user_id).or(matches::high_id.eq(user_id)))
                .select(count_star())
                .first::<i64>(conn)
                .map_err(AppError::Database)?;

            let items: Vec<Match> = matches::table
                .filter(matches::low_id.eq(user_id).or(matches::high_id.eq(user_id)))
                .order(matches::matched_at.desc())
                .offset(offset as i64)
                .limit(limit as i64)
                .load::<Match>(conn)
                .map_err(AppError::Database)?;

            Ok((items, total as u64))
        })
        .await
    }

    async fn append_message(
        &self,
        match_id: Uuid,
        sender_id: Uuid,
        content: String,
    ) -> AppResult<Message> {
        self.with_conn(move |conn| {
            // UUIDv7 ids keep (sent_at, id) ordering insertion-stable.
            let row = NewMessage {
                id: Uuid::now_v7(),
                match_id,
                sender_id,
                content,
                sent_at: Utc::now(),
            };
            diesel::insert_into(messages::table)
                .values(&row)
                .get_result::<Message>(conn)
                .map_err(AppError::Database)
        })
        .await
    }

    async fn list_messages(
        &self,
        match_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Message>, u64)> {
        self.with_conn(move |conn| {
            let total: i64 = messages::table
                .filter(messages::match_id.eq(match_id))
                .select(count_star())
                .first::<i64>(conn)
                .map_err(AppError::Database)?;

            let items: Vec<Message> = messages::table
                .filter(messages::match_id.eq(match_id))
                .order((messages::sent_at.asc(), messages::id.asc()))
                .offset(offset as i64)
                .limit(limit as i64)
                .load::<Message>(conn)
                .map_err(AppError::Database)?;

            Ok((items, total as u64))
        })
        .await
    }

    async fn create_user(
        &self,
        display_name: String,
        bio: Option<String>,
        photo_url: Option<String>,
    ) -> AppResult<User> {
        self.with_conn(move |conn| {
            let row = NewUser {
                id: Uuid::now_v7(),
                display_name,
                bio,
                photo_url,
                created_at: Utc::now(),
            };
            diesel::insert_into(users::table)
                .values(&row)
                .get_result::<User>(conn)
                .map_err(AppError::Database)
        })
        .await
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.with_conn(move |conn| {
            users::table
                .find(user_id)
                .first::<User>(conn)
                .optional()
                .map_err(AppError::Database)
        })
        .await
    }

    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool> {
        self.with_conn(move |conn| {
            users::table
                .filter(users::id.eq(user_id))
                .select(count_star())
                .first::<i64>(conn)
                .map(|c| c > 0)
                .map_err(AppError::Database)
        })
        .await
    }

    async fn display_name_exists(&self, display_name: &str) -> AppResult<bool> {
        let display_name = display_name.to_owned();
        self.with_conn(move |conn| {
            users::table
                .filter(users::display_name.eq(display_name))
                .select(count_star())
                .first::<i64>(conn)
                .map(|c| c > 0)
                .map_err(AppError::Database)
        })
        .await
    }
}
