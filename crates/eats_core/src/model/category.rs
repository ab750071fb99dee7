//! Category domain model.
//!
//! # Responsibility
//! - Define the deduplicated category record shared by creation and edit
//!   flows.
//!
//! # Invariants
//! - `slug` is unique across all categories and is the deduplication key.
//! - `name` keeps the first caller's raw spelling; later callers with the
//!   same slug never overwrite it.
//! - Categories are created lazily and never renamed or deleted by core.

use serde::{Deserialize, Serialize};

/// Stable identifier for a category row.
///
/// Categories are keyed by an integer rowid; the externally visible lookup
/// key is `slug`.
pub type CategoryId = i64;

/// Deduplicated restaurant category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Raw name as supplied by the first caller (trimmed).
    pub name: String,
    /// Normalized identity key: lowercased, whitespace collapsed to hyphens.
    pub slug: String,
}
