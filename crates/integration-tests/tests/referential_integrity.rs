//! Foreign-key integrity, batch lookup, and eager-load properties.
//!
//! Requires a running `PostgreSQL` (see crate docs); each test runs against
//! its own freshly migrated database.

use brewline_core::{ListParams, VariantId};
use brewline_integration_tests as fixtures;
use brewline_store::db::{RepositoryError, Repositories, VariantRepository};
use sqlx::PgPool;

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn dangling_variant_reference_fails_and_persists_nothing(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let customer = repos
        .customers()
        .create(&fixtures::customer("Mai", "mai.p"))
        .await
        .expect("create customer");
    let store = repos
        .stores()
        .create(&fixtures::store("Riverside"))
        .await
        .expect("create store");
    let order = repos
        .orders()
        .create(&fixtures::order(customer.id, store.id))
        .await
        .expect("create order");

    // No application-level pre-check: the storage engine rejects the write
    let err = repos
        .order_details()
        .create(&fixtures::order_detail(order.id, VariantId::random()))
        .await
        .expect_err("dangling variant reference must be rejected");
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));

    let page = repos
        .order_details()
        .list(&ListParams::all())
        .await
        .expect("list line items");
    assert_eq!(page.total_count, 0, "nothing may be persisted");
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn deleting_parent_with_children_is_restricted(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let cat = repos
        .categories()
        .create(&fixtures::category("Coffee"))
        .await
        .expect("create category");
    let prod = repos
        .products()
        .create(&fixtures::product("Cold Brew", cat.id))
        .await
        .expect("create product");
    let var = repos
        .variants()
        .create(&fixtures::variant("Grande", "3.50", prod.id))
        .await
        .expect("create variant");

    let err = repos
        .products()
        .delete(prod.id)
        .await
        .expect_err("product with live variants must not be deletable");
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));

    // Children first, then the parent
    repos.variants().delete(var.id).await.expect("delete variant");
    repos.products().delete(prod.id).await.expect("delete product");
    repos.categories().delete(cat.id).await.expect("delete category");
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn batch_lookup_empty_input_issues_no_query(pool: PgPool) {
    // Closing the pool makes any query fail, so an Ok result proves the
    // empty input short-circuits before touching the store.
    pool.close().await;

    let variants = VariantRepository::new(&pool)
        .get_by_ids(&[])
        .await
        .expect("empty input must not query");
    assert!(variants.is_empty());
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn batch_lookup_silently_drops_missing_ids(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let cat = repos
        .categories()
        .create(&fixtures::category("Coffee"))
        .await
        .expect("create category");
    let prod = repos
        .products()
        .create(&fixtures::product("Latte", cat.id))
        .await
        .expect("create product");

    let mut ids = Vec::new();
    for price in ["2.50", "3.00", "3.50"] {
        let variant = repos
            .variants()
            .create(&fixtures::variant("Tall", price, prod.id))
            .await
            .expect("create variant");
        ids.push(variant.id);
    }
    ids.push(VariantId::random()); // never persisted

    let found = repos
        .variants()
        .get_by_ids(&ids)
        .await
        .expect("batch lookup");
    assert_eq!(found.len(), 3, "the unknown id is dropped, not an error");

    let found_ids: Vec<VariantId> = found.iter().map(|v| v.id).collect();
    for id in ids.iter().take(3) {
        assert!(found_ids.contains(id));
    }
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn line_items_eager_load_their_variant(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let cat = repos
        .categories()
        .create(&fixtures::category("Coffee"))
        .await
        .expect("create category");
    let prod = repos
        .products()
        .create(&fixtures::product("Mocha", cat.id))
        .await
        .expect("create product");
    let tall = repos
        .variants()
        .create(&fixtures::variant("Tall", "3.00", prod.id))
        .await
        .expect("create variant");
    let grande = repos
        .variants()
        .create(&fixtures::variant("Grande", "3.80", prod.id))
        .await
        .expect("create variant");

    let customer = repos
        .customers()
        .create(&fixtures::customer("Hoa", "hoa.v"))
        .await
        .expect("create customer");
    let store = repos
        .stores()
        .create(&fixtures::store("Central"))
        .await
        .expect("create store");
    let order = repos
        .orders()
        .create(&fixtures::order(customer.id, store.id))
        .await
        .expect("create order");
    let other_order = repos
        .orders()
        .create(&fixtures::order(customer.id, store.id))
        .await
        .expect("create order");

    repos
        .order_details()
        .create(&fixtures::order_detail(order.id, tall.id))
        .await
        .expect("create line item");
    repos
        .order_details()
        .create(&fixtures::order_detail(order.id, grande.id))
        .await
        .expect("create line item");
    let elsewhere = repos
        .order_details()
        .create(&fixtures::order_detail(other_order.id, tall.id))
        .await
        .expect("create line item");

    let page = repos
        .order_details()
        .list_with_variant(Some(order.id), &ListParams::all())
        .await
        .expect("joined page");
    assert_eq!(page.total_count, 2);
    for item in &page.items {
        assert_eq!(item.variant.id, item.detail.variant_id);
        assert_eq!(item.detail.order_id, order.id);
    }

    let single = repos
        .order_details()
        .get_with_variant(elsewhere.id)
        .await
        .expect("joined single row");
    assert_eq!(single.detail.id, elsewhere.id);
    assert_eq!(single.variant.id, tall.id);
    assert_eq!(
        single.variant.beverage_option.as_deref(),
        Some("Tall")
    );
}
