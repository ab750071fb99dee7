//! Restaurant repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `restaurants` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Restaurant::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Delete is a hard delete; categories referenced by deleted rows survive.

use crate::db::DbError;
use crate::model::category::CategoryId;
use crate::model::restaurant::{Restaurant, RestaurantId, RestaurantValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const RESTAURANT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    address,
    cover_img,
    owner_uuid,
    category_id
FROM restaurants";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RestaurantValidationError),
    Db(DbError),
    NotFound(RestaurantId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "restaurant not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<RestaurantValidationError> for RepoError {
    fn from(value: RestaurantValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for restaurant CRUD operations.
pub trait RestaurantRepository {
    /// Persists one new restaurant and returns its stable id.
    fn create_restaurant(&self, restaurant: &Restaurant) -> RepoResult<RestaurantId>;
    /// Persists all mutable fields of one restaurant in a single update.
    fn update_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()>;
    /// Gets one restaurant by id.
    fn get_restaurant(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>>;
    /// Hard-deletes one restaurant by id.
    fn delete_restaurant(&self, id: RestaurantId) -> RepoResult<()>;
    /// Lists restaurants assigned to the given category.
    fn list_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Restaurant>>;
    /// Counts restaurants assigned to the given category.
    fn count_by_category(&self, category_id: CategoryId) -> RepoResult<u32>;
}

/// SQLite-backed restaurant repository.
pub struct SqliteRestaurantRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRestaurantRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RestaurantRepository for SqliteRestaurantRepository<'_> {
    fn create_restaurant(&self, restaurant: &Restaurant) -> RepoResult<RestaurantId> {
        restaurant.validate()?;

        self.conn.execute(
            "INSERT INTO restaurants (
                uuid,
                name,
                address,
                cover_img,
                owner_uuid,
                category_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                restaurant.uuid.to_string(),
                restaurant.name.as_str(),
                restaurant.address.as_str(),
                restaurant.cover_img.as_str(),
                restaurant.owner_id.to_string(),
                restaurant.category_id,
            ],
        )?;

        Ok(restaurant.uuid)
    }

    fn update_restaurant(&self, restaurant: &Restaurant) -> RepoResult<()> {
        restaurant.validate()?;

        // owner_uuid is deliberately absent: ownership is immutable.
        let changed = self.conn.execute(
            "UPDATE restaurants
             SET
                name = ?1,
                address = ?2,
                cover_img = ?3,
                category_id = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                restaurant.name.as_str(),
                restaurant.address.as_str(),
                restaurant.cover_img.as_str(),
                restaurant.category_id,
                restaurant.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(restaurant.uuid));
        }

        Ok(())
    }

    fn get_restaurant(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RESTAURANT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_restaurant_row(row)?));
        }

        Ok(None)
    }

    fn delete_restaurant(&self, id: RestaurantId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM restaurants WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Restaurant>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESTAURANT_SELECT_SQL}
             WHERE category_id = ?1
             ORDER BY updated_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([category_id])?;
        let mut restaurants = Vec::new();
        while let Some(row) = rows.next()? {
            restaurants.push(parse_restaurant_row(row)?);
        }

        Ok(restaurants)
    }

    fn count_by_category(&self, category_id: CategoryId) -> RepoResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM restaurants WHERE category_id = ?1;",
            [category_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn parse_restaurant_row(row: &Row<'_>) -> RepoResult<Restaurant> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid(&uuid_text, "restaurants.uuid")?;

    let owner_text: String = row.get("owner_uuid")?;
    let owner_id = parse_uuid(&owner_text, "restaurants.owner_uuid")?;

    let restaurant = Restaurant {
        uuid,
        name: row.get("name")?,
        address: row.get("address")?,
        cover_img: row.get("cover_img")?,
        owner_id,
        category_id: row.get("category_id")?,
    };
    restaurant.validate()?;
    Ok(restaurant)
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
