use uuid::Uuid;

use ember_shared::errors::{AppError, ErrorCode};

/// Order-independent identity of a two-user relationship.
///
/// Invariant: `low < high` (bytewise UUID order), so the same two users
/// always canonicalize to the same pair no matter who acted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalPair {
    low: Uuid,
    high: Uuid,
}

impl CanonicalPair {
    /// Fails only on a self-pair; a relationship with oneself is invalid.
    pub fn new(a: Uuid, b: Uuid) -> Result<Self, AppError> {
        if a == b {
            return Err(AppError::new(
                ErrorCode::SelfSwipe,
                "a user cannot be paired with themselves",
            ));
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { low, high })
    }

    pub fn low(&self) -> Uuid {
        self.low
    }

    pub fn high(&self) -> Uuid {
        self.high
    }
}
