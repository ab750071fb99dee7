use eats_core::db::open_db_in_memory;
use eats_core::{
    Category, CategoryId, CategoryRepository, CreateRestaurantInput, DeleteRestaurantInput,
    EditRestaurantInput, RepoError, RepoResult, Restaurant, RestaurantId, RestaurantRepository,
    RestaurantService, SqliteCategoryRepository, SqliteRestaurantRepository, User, UserRole,
};
use rusqlite::Connection;
use uuid::Uuid;

fn service(
    conn: &Connection,
) -> RestaurantService<SqliteRestaurantRepository<'_>, SqliteCategoryRepository<'_>> {
    RestaurantService::new(
        SqliteRestaurantRepository::new(conn),
        SqliteCategoryRepository::new(conn),
    )
}

fn create_input(name: &str, category_name: &str) -> CreateRestaurantInput {
    CreateRestaurantInput {
        name: name.to_string(),
        address: "123 Main St".to_string(),
        cover_img: "cover.png".to_string(),
        category_name: category_name.to_string(),
    }
}

fn restaurant_id_by_name(conn: &Connection, name: &str) -> Uuid {
    let uuid_text: String = conn
        .query_row(
            "SELECT uuid FROM restaurants WHERE name = ?1;",
            [name],
            |row| row.get(0),
        )
        .unwrap();
    Uuid::parse_str(&uuid_text).unwrap()
}

fn category_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_restaurant_assigns_owner_and_category() {
    let conn = open_db_in_memory().unwrap();
    let owner = User::new(UserRole::Owner);

    let output = service(&conn).create_restaurant(&owner, create_input("BBQ House", "Korean BBQ"));
    assert!(output.ok);
    assert_eq!(output.error, None);

    let id = restaurant_id_by_name(&conn, "BBQ House");
    let repo = SqliteRestaurantRepository::new(&conn);
    let stored = repo.get_restaurant(id).unwrap().unwrap();
    assert_eq!(stored.owner_id, owner.id);
    assert!(stored.category_id.is_some());

    let categories = SqliteCategoryRepository::new(&conn);
    let category = categories.find_by_slug("korean-bbq").unwrap().unwrap();
    assert_eq!(stored.category_id, Some(category.id));
}

#[test]
fn create_restaurant_with_blank_category_fails_with_create_message() {
    let conn = open_db_in_memory().unwrap();
    let owner = User::new(UserRole::Owner);

    let output = service(&conn).create_restaurant(&owner, create_input("BBQ House", "   "));
    assert!(!output.ok);
    assert_eq!(output.error.as_deref(), Some("Could not create restaurant"));
}

#[test]
fn non_owner_cannot_edit_and_target_is_unmodified() {
    let conn = open_db_in_memory().unwrap();
    let owner = User::new(UserRole::Owner);
    let stranger = User::new(UserRole::Owner);

    let svc = service(&conn);
    assert!(svc
        .create_restaurant(&owner, create_input("BBQ House", "Korean BBQ"))
        .ok);
    let id = restaurant_id_by_name(&conn, "BBQ House");

    let output = svc.edit_restaurant(
        &stranger,
        EditRestaurantInput {
            restaurant_id: id,
            name: Some("Hijacked".to_string()),
            ..Default::default()
        },
    );
    assert!(!output.ok);
    assert_eq!(
        output.error.as_deref(),
        Some("You can't edit a restaurant that you don't own")
    );

    let repo = SqliteRestaurantRepository::new(&conn);
    let stored = repo.get_restaurant(id).unwrap().unwrap();
    assert_eq!(stored.name, "BBQ House");
}

#[test]
fn non_owner_cannot_delete_and_target_survives() {
    let conn = open_db_in_memory().unwrap();
    let owner = User::new(UserRole::Owner);
    let stranger = User::new(UserRole::Client);

    let svc = service(&conn);
    assert!(svc
        .create_restaurant(&owner, create_input("BBQ House", "Korean BBQ"))
        .ok);
    let id = restaurant_id_by_name(&conn, "BBQ House");

    let output = svc.delete_restaurant(&stranger, DeleteRestaurantInput { restaurant_id: id });
    assert!(!output.ok);
    assert_eq!(
        output.error.as_deref(),
        Some("You can't delete a restaurant that you don't own")
    );

    let repo = SqliteRestaurantRepository::new(&conn);
    assert!(repo.get_restaurant(id).unwrap().is_some());
}

#[test]
fn missing_restaurant_wins_over_caller_identity() {
    let conn = open_db_in_memory().unwrap();
    let anyone = User::new(UserRole::Client);
    let svc = service(&conn);
    let missing = Uuid::new_v4();

    let edit = svc.edit_restaurant(
        &anyone,
        EditRestaurantInput {
            restaurant_id: missing,
            ..Default::default()
        },
    );
    assert!(!edit.ok);
    assert_eq!(edit.error.as_deref(), Some("Restaurant not found"));

    let delete = svc.delete_restaurant(
        &anyone,
        DeleteRestaurantInput {
            restaurant_id: missing,
        },
    );
    assert!(!delete.ok);
    assert_eq!(delete.error.as_deref(), Some("Restaurant not found"));
}

#[test]
fn edit_merges_only_provided_fields() {
    let conn = open_db_in_memory().unwrap();
    let owner = User::new(UserRole::Owner);

    let svc = service(&conn);
    assert!(svc
        .create_restaurant(&owner, create_input("BBQ House", "Korean BBQ"))
        .ok);
    let id = restaurant_id_by_name(&conn, "BBQ House");

    let output = svc.edit_restaurant(
        &owner,
        EditRestaurantInput {
            restaurant_id: id,
            name: Some("BBQ Palace".to_string()),
            ..Default::default()
        },
    );
    assert!(output.ok);

    let repo = SqliteRestaurantRepository::new(&conn);
    let stored = repo.get_restaurant(id).unwrap().unwrap();
    assert_eq!(stored.name, "BBQ Palace");
    assert_eq!(stored.address, "123 Main St");
    assert_eq!(stored.cover_img, "cover.png");
}

/// Registry stub that fails the test if the dispatcher consults it.
struct UntouchableCategories;

impl CategoryRepository for UntouchableCategories {
    fn get_or_create(&self, name: &str) -> RepoResult<Category> {
        panic!("category registry must not be consulted for `{name}` on a category-less edit");
    }

    fn find_by_slug(&self, _slug: &str) -> RepoResult<Option<Category>> {
        Ok(None)
    }
}

#[test]
fn edit_without_category_name_keeps_category_and_skips_registry() {
    let conn = open_db_in_memory().unwrap();
    let owner = User::new(UserRole::Owner);

    assert!(service(&conn)
        .create_restaurant(&owner, create_input("BBQ House", "Korean BBQ"))
        .ok);
    let id = restaurant_id_by_name(&conn, "BBQ House");
    let category_before = SqliteRestaurantRepository::new(&conn)
        .get_restaurant(id)
        .unwrap()
        .unwrap()
        .category_id;

    let guarded = RestaurantService::new(
        SqliteRestaurantRepository::new(&conn),
        UntouchableCategories,
    );
    let output = guarded.edit_restaurant(
        &owner,
        EditRestaurantInput {
            restaurant_id: id,
            address: Some("456 Side St".to_string()),
            ..Default::default()
        },
    );
    assert!(output.ok);

    let stored = SqliteRestaurantRepository::new(&conn)
        .get_restaurant(id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.category_id, category_before);
    assert_eq!(stored.address, "456 Side St");
    assert_eq!(category_count(&conn), 1);
}

#[test]
fn edit_with_blank_category_fails_with_edit_message() {
    let conn = open_db_in_memory().unwrap();
    let owner = User::new(UserRole::Owner);

    let svc = service(&conn);
    assert!(svc
        .create_restaurant(&owner, create_input("BBQ House", "Korean BBQ"))
        .ok);
    let id = restaurant_id_by_name(&conn, "BBQ House");

    let output = svc.edit_restaurant(
        &owner,
        EditRestaurantInput {
            restaurant_id: id,
            name: Some("BBQ Palace".to_string()),
            category_name: Some("   ".to_string()),
            ..Default::default()
        },
    );
    assert!(!output.ok);
    assert_eq!(output.error.as_deref(), Some("Could not edit restaurant."));

    // The registry failed before the merge; nothing was written.
    let stored = SqliteRestaurantRepository::new(&conn)
        .get_restaurant(id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "BBQ House");
}

/// Repository stub whose write paths always fail, simulating storage errors
/// after a successful load+authorize.
struct BrokenWrites {
    stored: Restaurant,
}

impl RestaurantRepository for BrokenWrites {
    fn create_restaurant(&self, _restaurant: &Restaurant) -> RepoResult<RestaurantId> {
        Err(RepoError::InvalidData("disk on fire".to_string()))
    }

    fn update_restaurant(&self, _restaurant: &Restaurant) -> RepoResult<()> {
        Err(RepoError::InvalidData("disk on fire".to_string()))
    }

    fn get_restaurant(&self, _id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        Ok(Some(self.stored.clone()))
    }

    fn delete_restaurant(&self, _id: RestaurantId) -> RepoResult<()> {
        Err(RepoError::InvalidData("disk on fire".to_string()))
    }

    fn list_by_category(&self, _category_id: CategoryId) -> RepoResult<Vec<Restaurant>> {
        Ok(Vec::new())
    }

    fn count_by_category(&self, _category_id: CategoryId) -> RepoResult<u32> {
        Ok(0)
    }
}

#[test]
fn storage_failure_reports_operation_specific_messages() {
    let owner = User::new(UserRole::Owner);
    let stored = Restaurant::new("BBQ House", "123 Main St", "cover.png", owner.id);
    let id = stored.uuid;

    let svc = RestaurantService::new(BrokenWrites { stored }, UntouchableCategories);

    let edit = svc.edit_restaurant(
        &owner,
        EditRestaurantInput {
            restaurant_id: id,
            name: Some("BBQ Palace".to_string()),
            ..Default::default()
        },
    );
    assert!(!edit.ok);
    assert_eq!(edit.error.as_deref(), Some("Could not edit restaurant."));

    let delete = svc.delete_restaurant(&owner, DeleteRestaurantInput { restaurant_id: id });
    assert!(!delete.ok);
    assert_eq!(delete.error.as_deref(), Some("Could not delete restaurant."));
}

#[test]
fn delete_is_final_and_categories_survive() {
    let conn = open_db_in_memory().unwrap();
    let owner = User::new(UserRole::Owner);

    let svc = service(&conn);
    assert!(svc
        .create_restaurant(&owner, create_input("BBQ House", "Korean BBQ"))
        .ok);
    let id = restaurant_id_by_name(&conn, "BBQ House");

    let output = svc.delete_restaurant(&owner, DeleteRestaurantInput { restaurant_id: id });
    assert!(output.ok);

    let repo = SqliteRestaurantRepository::new(&conn);
    assert!(repo.get_restaurant(id).unwrap().is_none());

    // The category row is never cascaded, even when nothing references it.
    let categories = SqliteCategoryRepository::new(&conn);
    let category = categories.find_by_slug("korean-bbq").unwrap().unwrap();
    assert_eq!(repo.count_by_category(category.id).unwrap(), 0);

    let repeat = svc.delete_restaurant(&owner, DeleteRestaurantInput { restaurant_id: id });
    assert!(!repeat.ok);
    assert_eq!(repeat.error.as_deref(), Some("Restaurant not found"));
}

#[test]
fn find_category_by_slug_returns_category_with_restaurants() {
    let conn = open_db_in_memory().unwrap();
    let owner = User::new(UserRole::Owner);

    let svc = service(&conn);
    assert!(svc
        .create_restaurant(&owner, create_input("BBQ House", "Korean BBQ"))
        .ok);
    assert!(svc
        .create_restaurant(&owner, create_input("Seoul Grill", "korean bbq"))
        .ok);

    let details = svc.find_category_by_slug("korean-bbq").unwrap().unwrap();
    assert_eq!(details.category.slug, "korean-bbq");
    assert_eq!(details.restaurants.len(), 2);

    assert!(svc.find_category_by_slug("unknown").unwrap().is_none());
}

// End-to-end walk through the ownership + dedup scenario: create under one
// owner, reject a stranger's delete, re-edit with a differently-cased
// category name and keep the same category row.
#[test]
fn ownership_and_dedup_scenario() {
    let conn = open_db_in_memory().unwrap();
    let u1 = User::new(UserRole::Owner);
    let u2 = User::new(UserRole::Owner);

    let svc = service(&conn);
    assert!(svc
        .create_restaurant(&u1, create_input("BBQ House", "Korean BBQ"))
        .ok);
    let id = restaurant_id_by_name(&conn, "BBQ House");
    assert_eq!(category_count(&conn), 1);

    let hijack = svc.delete_restaurant(&u2, DeleteRestaurantInput { restaurant_id: id });
    assert!(!hijack.ok);
    assert_eq!(
        hijack.error.as_deref(),
        Some("You can't delete a restaurant that you don't own")
    );

    let repo = SqliteRestaurantRepository::new(&conn);
    let before = repo.get_restaurant(id).unwrap().unwrap();

    let edit = svc.edit_restaurant(
        &u1,
        EditRestaurantInput {
            restaurant_id: id,
            category_name: Some("korean bbq".to_string()),
            ..Default::default()
        },
    );
    assert!(edit.ok);

    let after = repo.get_restaurant(id).unwrap().unwrap();
    assert_eq!(after.category_id, before.category_id);
    assert_eq!(category_count(&conn), 1);
}
