//! Restaurant domain model.
//!
//! # Responsibility
//! - Define the canonical restaurant record shared by create/edit/delete
//!   use-cases.
//! - Provide construction helpers that pin ownership at creation time.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another restaurant.
//! - `owner_id` is set once at construction and never changes.
//! - `category_id` is nullable until a category is assigned.

use crate::model::category::CategoryId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a restaurant record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RestaurantId = Uuid;

/// Validation failure for restaurant records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantValidationError {
    /// `uuid` must not be the nil uuid.
    NilUuid,
    /// `name` must contain non-whitespace characters.
    EmptyName,
    /// `address` must contain non-whitespace characters.
    EmptyAddress,
}

impl Display for RestaurantValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "restaurant uuid must not be nil"),
            Self::EmptyName => write!(f, "restaurant name must not be blank"),
            Self::EmptyAddress => write!(f, "restaurant address must not be blank"),
        }
    }
}

impl Error for RestaurantValidationError {}

/// Canonical restaurant record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Stable global id used for lookup, authorization and auditing.
    pub uuid: RestaurantId,
    pub name: String,
    pub address: String,
    /// Cover image reference (URL or storage key); not interpreted by core.
    pub cover_img: String,
    /// Owning user account. Immutable after creation.
    pub owner_id: UserId,
    /// Assigned category row, if any.
    pub category_id: Option<CategoryId>,
}

impl Restaurant {
    /// Creates a new restaurant with a generated stable id.
    ///
    /// # Invariants
    /// - `owner_id` comes from the authenticated caller, never from input.
    /// - `category_id` starts unset; the creation path assigns it via the
    ///   category registry.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        cover_img: impl Into<String>,
        owner_id: UserId,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            cover_img: cover_img.into(),
            owner_id,
            category_id: None,
        }
    }

    /// Returns whether the given user owns this restaurant.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Validates record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), RestaurantValidationError> {
        if self.uuid.is_nil() {
            return Err(RestaurantValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(RestaurantValidationError::EmptyName);
        }
        if self.address.trim().is_empty() {
            return Err(RestaurantValidationError::EmptyAddress);
        }
        Ok(())
    }
}
