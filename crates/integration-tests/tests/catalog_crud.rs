//! CRUD lifecycle properties over the entity store.
//!
//! Requires a running `PostgreSQL` (see crate docs); each test runs against
//! its own freshly migrated database.

use brewline_integration_tests as fixtures;
use brewline_store::db::{RepositoryError, Repositories};
use brewline_store::models::{CategoryChanges, ProductChanges};
use sqlx::PgPool;

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn create_assigns_fresh_ids_and_persists_fields(pool: PgPool) {
    fixtures::init_tracing();
    let repos = Repositories::new(&pool);

    let first = repos
        .categories()
        .create(&fixtures::category("Espresso"))
        .await
        .expect("create first category");
    let second = repos
        .categories()
        .create(&fixtures::category("Espresso"))
        .await
        .expect("create second category");

    // Same payload, distinct freshly assigned ids
    assert_ne!(first.id, second.id);

    let fetched = repos
        .categories()
        .get(first.id)
        .await
        .expect("get created category");
    assert_eq!(fetched, first);
    assert_eq!(fetched.name, "Espresso");
    assert_eq!(fetched.description.as_deref(), Some("Espresso beverages"));
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn update_overwrites_only_supplied_fields(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let cat = repos
        .categories()
        .create(&fixtures::category("Tea"))
        .await
        .expect("create category");
    let created = repos
        .products()
        .create(&fixtures::product("Matcha Latte", cat.id))
        .await
        .expect("create product");

    let updated = repos
        .products()
        .update(
            created.id,
            &ProductChanges {
                description: Some("Stone-ground ceremonial matcha".to_owned()),
                ..ProductChanges::default()
            },
        )
        .await
        .expect("update product");

    assert_eq!(
        updated.description.as_deref(),
        Some("Stone-ground ceremonial matcha")
    );
    // Everything not in the change-set is untouched
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.image_url, created.image_url);
    assert_eq!(updated.category_id, created.category_id);
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn update_missing_row_is_not_found(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let err = repos
        .categories()
        .update(
            brewline_core::CategoryId::random(),
            &CategoryChanges {
                name: Some("Ghost".to_owned()),
                ..CategoryChanges::default()
            },
        )
        .await
        .expect_err("updating a missing category must fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn delete_then_get_returns_not_found(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let store = repos
        .stores()
        .create(&fixtures::store("Downtown"))
        .await
        .expect("create store");

    repos.stores().delete(store.id).await.expect("delete store");

    let err = repos
        .stores()
        .get(store.id)
        .await
        .expect_err("deleted store must be gone");
    assert!(matches!(err, RepositoryError::NotFound));

    let err = repos
        .stores()
        .delete(store.id)
        .await
        .expect_err("double delete must fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn find_by_username_is_entity_or_absent(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let created = repos
        .customers()
        .create(&fixtures::customer("Linh", "linh.t"))
        .await
        .expect("create customer");
    assert!(created.is_active, "accounts start active");

    let found = repos
        .customers()
        .find_by_username("linh.t")
        .await
        .expect("lookup succeeds")
        .expect("customer present");
    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash.as_deref(), Some("$2b$12$test-digest"));

    let absent = repos
        .customers()
        .find_by_username("nobody")
        .await
        .expect("lookup succeeds");
    assert!(absent.is_none(), "a miss is absence, not an error");
}
