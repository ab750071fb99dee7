//! Caller identity used as the authorization subject.
//!
//! # Responsibility
//! - Carry the id/role pair that write paths authorize against.
//!
//! # Invariants
//! - Core never mutates users; persistence of user accounts lives outside
//!   this crate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a user account.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = Uuid;

/// Platform role of a caller.
///
/// Role gating happens at the transport layer; core write paths only compare
/// owner ids, but the role travels with the caller identity for logging and
/// future checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Orders food.
    Client,
    /// Owns restaurants.
    Owner,
    /// Delivers orders.
    Delivery,
}

/// Caller identity passed into guarded write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable account id compared against resource ownership.
    pub id: UserId,
    pub role: UserRole,
}

impl User {
    /// Creates a caller identity with a generated stable id.
    pub fn new(role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
        }
    }

    /// Creates a caller identity with an existing account id.
    pub fn with_id(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }
}
