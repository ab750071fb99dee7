//! Restaurant use-case service: creation path and guarded mutations.
//!
//! # Responsibility
//! - Provide create/edit/delete entry points returning the uniform envelope.
//! - Share one load+authorize step across all owner-guarded mutations.
//! - Resolve category names through the registry, lazily creating rows.
//!
//! # Invariants
//! - Ownership is checked before any mutation is applied.
//! - The owner of a new restaurant is always the authenticated caller, never
//!   taken from input.
//! - An edit without a category name never touches the category registry.
//! - Mutation kinds are a closed enum dispatched after authorization, so a
//!   new kind cannot skip the ownership gate.

use crate::model::category::Category;
use crate::model::restaurant::{Restaurant, RestaurantId};
use crate::model::user::User;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::restaurant_repo::{RepoResult, RestaurantRepository};
use crate::service::CoreOutput;
use log::error;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input for the restaurant creation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRestaurantInput {
    pub name: String,
    pub address: String,
    pub cover_img: String,
    /// Creation always names a category; it is resolved via the registry.
    pub category_name: String,
}

/// Input for the owner-guarded edit mutation.
///
/// Every field except the target id is optional; absent fields leave the
/// stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRestaurantInput {
    pub restaurant_id: RestaurantId,
    pub name: Option<String>,
    pub address: Option<String>,
    pub cover_img: Option<String>,
    pub category_name: Option<String>,
}

/// Input for the owner-guarded delete mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRestaurantInput {
    pub restaurant_id: RestaurantId,
}

/// Kind of owner-guarded mutation, used in user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Edit,
    Delete,
}

impl MutationKind {
    /// Lowercase verb used in user-facing messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl Display for MutationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service error for restaurant use-cases.
///
/// `Display` output is the exact user-facing message carried in the
/// `CoreOutput` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantServiceError {
    /// Target restaurant id does not exist.
    RestaurantNotFound,
    /// Caller is not the owner of the target restaurant.
    NotOwner(MutationKind),
    /// Storage failure during the creation path.
    CreateFailed,
    /// Storage failure while loading or applying a guarded mutation.
    MutationFailed(MutationKind),
}

impl Display for RestaurantServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RestaurantNotFound => write!(f, "Restaurant not found"),
            Self::NotOwner(kind) => {
                write!(f, "You can't {kind} a restaurant that you don't own")
            }
            Self::CreateFailed => write!(f, "Could not create restaurant"),
            Self::MutationFailed(kind) => write!(f, "Could not {kind} restaurant."),
        }
    }
}

impl Error for RestaurantServiceError {}

/// Owner-guarded mutation dispatched after the shared load+authorize step.
enum RestaurantMutation {
    Edit(EditRestaurantInput),
    Delete,
}

impl RestaurantMutation {
    fn kind(&self) -> MutationKind {
        match self {
            Self::Edit(_) => MutationKind::Edit,
            Self::Delete => MutationKind::Delete,
        }
    }
}

/// Category row together with the restaurants assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDetails {
    pub category: Category,
    pub restaurants: Vec<Restaurant>,
}

/// Restaurant service facade over repository implementations.
pub struct RestaurantService<R: RestaurantRepository, C: CategoryRepository> {
    restaurants: R,
    categories: C,
}

impl<R: RestaurantRepository, C: CategoryRepository> RestaurantService<R, C> {
    /// Creates a service using the provided repository implementations.
    pub fn new(restaurants: R, categories: C) -> Self {
        Self {
            restaurants,
            categories,
        }
    }

    /// Creates one restaurant owned by the caller.
    ///
    /// # Contract
    /// - Owner is the authenticated caller; input cannot impersonate.
    /// - `category_name` is always resolved via the registry and may create
    ///   a category row as a side effect.
    pub fn create_restaurant(&self, owner: &User, input: CreateRestaurantInput) -> CoreOutput {
        self.try_create(owner, input).into()
    }

    /// Edits one restaurant owned by the caller.
    pub fn edit_restaurant(&self, owner: &User, input: EditRestaurantInput) -> CoreOutput {
        let restaurant_id = input.restaurant_id;
        self.perform_mutation(owner, restaurant_id, RestaurantMutation::Edit(input))
            .into()
    }

    /// Deletes one restaurant owned by the caller.
    pub fn delete_restaurant(&self, owner: &User, input: DeleteRestaurantInput) -> CoreOutput {
        self.perform_mutation(owner, input.restaurant_id, RestaurantMutation::Delete)
            .into()
    }

    /// Fetches one category by slug together with its restaurants.
    pub fn find_category_by_slug(&self, slug: &str) -> RepoResult<Option<CategoryDetails>> {
        let Some(category) = self.categories.find_by_slug(slug)? else {
            return Ok(None);
        };
        let restaurants = self.restaurants.list_by_category(category.id)?;
        Ok(Some(CategoryDetails {
            category,
            restaurants,
        }))
    }

    fn try_create(
        &self,
        owner: &User,
        input: CreateRestaurantInput,
    ) -> Result<(), RestaurantServiceError> {
        let mut restaurant = Restaurant::new(input.name, input.address, input.cover_img, owner.id);

        let category = self
            .categories
            .get_or_create(input.category_name.as_str())
            .map_err(|err| {
                error!(
                    "event=restaurant_create module=service status=error step=category error={err}"
                );
                RestaurantServiceError::CreateFailed
            })?;
        restaurant.category_id = Some(category.id);

        self.restaurants
            .create_restaurant(&restaurant)
            .map_err(|err| {
                error!(
                    "event=restaurant_create module=service status=error step=persist error={err}"
                );
                RestaurantServiceError::CreateFailed
            })?;

        Ok(())
    }

    /// Shared load+authorize scaffolding for every owner-guarded mutation.
    ///
    /// # Contract
    /// - Absent target wins over authorization: `RestaurantNotFound` is
    ///   returned regardless of caller identity.
    /// - Operation-specific behavior runs only after the ownership check.
    fn perform_mutation(
        &self,
        owner: &User,
        restaurant_id: RestaurantId,
        mutation: RestaurantMutation,
    ) -> Result<(), RestaurantServiceError> {
        let kind = mutation.kind();

        let loaded = self
            .restaurants
            .get_restaurant(restaurant_id)
            .map_err(|err| {
                error!(
                    "event=restaurant_{kind} module=service status=error step=load error={err}"
                );
                RestaurantServiceError::MutationFailed(kind)
            })?;
        let Some(mut restaurant) = loaded else {
            return Err(RestaurantServiceError::RestaurantNotFound);
        };

        if !restaurant.is_owned_by(owner.id) {
            return Err(RestaurantServiceError::NotOwner(kind));
        }

        match mutation {
            RestaurantMutation::Edit(input) => {
                // Resolve the category only when the payload asks for a
                // change; a plain edit must not create or look up rows.
                let category = match input.category_name.as_deref() {
                    Some(name) => Some(self.categories.get_or_create(name).map_err(|err| {
                        error!(
                            "event=restaurant_edit module=service status=error step=category error={err}"
                        );
                        RestaurantServiceError::MutationFailed(kind)
                    })?),
                    None => None,
                };

                if let Some(name) = input.name {
                    restaurant.name = name;
                }
                if let Some(address) = input.address {
                    restaurant.address = address;
                }
                if let Some(cover_img) = input.cover_img {
                    restaurant.cover_img = cover_img;
                }
                if let Some(category) = category {
                    restaurant.category_id = Some(category.id);
                }

                self.restaurants
                    .update_restaurant(&restaurant)
                    .map_err(|err| {
                        error!(
                            "event=restaurant_edit module=service status=error step=persist error={err}"
                        );
                        RestaurantServiceError::MutationFailed(kind)
                    })
            }
            RestaurantMutation::Delete => {
                self.restaurants
                    .delete_restaurant(restaurant_id)
                    .map_err(|err| {
                        error!(
                            "event=restaurant_delete module=service status=error step=persist error={err}"
                        );
                        RestaurantServiceError::MutationFailed(kind)
                    })
            }
        }
    }
}
