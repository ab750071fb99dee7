//! Domain model for the Eats backend core.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep identity and ownership semantics in one place.
//!
//! # Invariants
//! - Every restaurant is identified by a stable `RestaurantId`.
//! - A restaurant has exactly one owner; the owner never changes after
//!   creation.
//! - Category identity is the normalized slug, not the raw name.

pub mod category;
pub mod restaurant;
pub mod user;
