use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{matches, messages, swipes, users};

// --- Direction ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("unknown direction: {s}")),
        }
    }
}

// --- User ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = users)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Swipe ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = swipes)]
pub struct Swipe {
    pub id: Uuid,
    pub swiper_id: Uuid,
    pub target_id: Uuid,
    pub direction: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = swipes)]
pub struct NewSwipe {
    pub id: Uuid,
    pub swiper_id: Uuid,
    pub target_id: Uuid,
    pub direction: String,
    pub created_at: DateTime<Utc>,
}

// --- Match ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = matches)]
pub struct Match {
    pub id: Uuid,
    pub low_id: Uuid,
    pub high_id: Uuid,
    pub matched_at: DateTime<Utc>,
}

impl Match {
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.low_id == user_id || self.high_id == user_id
    }

    /// The other participant, if `user_id` is one of the pair.
    pub fn partner_of(&self, user_id: Uuid) -> Option<Uuid> {
        if self.low_id == user_id {
            Some(self.high_id)
        } else if self.high_id == user_id {
            Some(self.low_id)
        } else {
            None
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = matches)]
pub struct NewMatch {
    pub id: Uuid,
    pub low_id: Uuid,
    pub high_id: Uuid,
    pub matched_at: DateTime<Utc>,
}

// --- Message ---

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = messages)]
pub struct Message {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessage {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_roundtrip() {
        assert_eq!("right".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!(Direction::Left.to_string(), "left");
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn partner_of_picks_the_other_side() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let m = Match {
            id: Uuid::now_v7(),
            low_id: low,
            high_id: high,
            matched_at: Utc::now(),
        };
        assert_eq!(m.partner_of(a), Some(b));
        assert_eq!(m.partner_of(b), Some(a));
        assert_eq!(m.partner_of(Uuid::now_v7()), None);
    }
}
