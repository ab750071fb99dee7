//! Core domain logic for the Eats restaurant platform backend.
//! This crate is the single source of truth for business invariants:
//! owner-guarded restaurant mutations, slug-deduplicated categories, and
//! best-effort transactional mail.

pub mod db;
pub mod logging;
pub mod mail;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use mail::{EmailVar, MailConfig, MailService};
pub use model::category::{Category, CategoryId};
pub use model::restaurant::{Restaurant, RestaurantId, RestaurantValidationError};
pub use model::user::{User, UserId, UserRole};
pub use repo::category_repo::{slugify, CategoryRepository, SqliteCategoryRepository};
pub use repo::restaurant_repo::{
    RepoError, RepoResult, RestaurantRepository, SqliteRestaurantRepository,
};
pub use service::restaurant_service::{
    CategoryDetails, CreateRestaurantInput, DeleteRestaurantInput, EditRestaurantInput,
    MutationKind, RestaurantService, RestaurantServiceError,
};
pub use service::CoreOutput;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
