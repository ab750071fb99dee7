//! Category registry contracts and SQLite implementation.
//!
//! # Responsibility
//! - Resolve human-supplied category names to deduplicated category rows.
//! - Own slug normalization, the true identity key.
//!
//! # Invariants
//! - At most one category row exists per slug; the schema-level UNIQUE
//!   constraint enforces this under concurrency.
//! - An existing row's `name` is never overwritten by a later caller's
//!   spelling of the same slug.
//! - A uniqueness violation during insert means another writer won the race;
//!   the registry re-reads and returns that row instead of failing.

use crate::model::category::{Category, CategoryId};
use crate::repo::restaurant_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, Row};

/// Derives the normalized identity slug for a category name.
///
/// Lowercases the trimmed name and collapses every whitespace run into a
/// single hyphen. Returns `None` for blank input.
pub fn slugify(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-"),
    )
}

/// Registry interface for category resolution.
pub trait CategoryRepository {
    /// Resolves a raw name to its category row, creating it on first use.
    fn get_or_create(&self, name: &str) -> RepoResult<Category>;
    /// Looks up one category by its normalized slug.
    fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>>;
}

/// SQLite-backed category registry.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a registry from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn get_or_create(&self, name: &str) -> RepoResult<Category> {
        let slug = slugify(name).ok_or_else(|| {
            RepoError::InvalidData(format!("category name `{name}` is blank after normalization"))
        })?;

        if let Some(existing) = self.find_by_slug(&slug)? {
            return Ok(existing);
        }

        let insert = self.conn.execute(
            "INSERT INTO categories (name, slug) VALUES (?1, ?2);",
            params![name.trim(), slug.as_str()],
        );
        match insert {
            Ok(_) => {}
            // A concurrent writer inserted the same slug between our lookup
            // and insert; the UNIQUE constraint rejected ours. Fall through
            // and return the winning row.
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation => {}
            Err(err) => return Err(err.into()),
        }

        self.find_by_slug(&slug)?.ok_or_else(|| {
            RepoError::InvalidData(format!("category slug `{slug}` missing after insert"))
        })
    }

    fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, slug
             FROM categories
             WHERE slug = ?1;",
        )?;

        let mut rows = stmt.query([slug])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }

        Ok(None)
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id: CategoryId = row.get("id")?;
    Ok(Category {
        id,
        name: row.get("name")?,
        slug: row.get("slug")?,
    })
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Korean BBQ").as_deref(), Some("korean-bbq"));
        assert_eq!(slugify("  korean   bbq  ").as_deref(), Some("korean-bbq"));
        assert_eq!(slugify("korean-bbq").as_deref(), Some("korean-bbq"));
    }

    #[test]
    fn slugify_rejects_blank_input() {
        assert_eq!(slugify(""), None);
        assert_eq!(slugify("   "), None);
        assert_eq!(slugify("\t\n"), None);
    }
}
