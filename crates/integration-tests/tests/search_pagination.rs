//! Search predicate and pagination contract properties.
//!
//! Requires a running `PostgreSQL` (see crate docs); each test runs against
//! its own freshly migrated database.

use brewline_core::{ListParams, PageQuery, PagedResponse};
use brewline_integration_tests as fixtures;
use brewline_store::db::Repositories;
use brewline_store::models::{CustomerFilter, ProductFilter, VariantFilter};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashSet;

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn list_reports_full_count_regardless_of_window(pool: PgPool) {
    let repos = Repositories::new(&pool);

    for i in 0..5 {
        repos
            .categories()
            .create(&fixtures::category(&format!("Category {i}")))
            .await
            .expect("create category");
    }

    let page = repos
        .categories()
        .list(&ListParams::new(3, Some(2)))
        .await
        .expect("list");
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 5);

    // Past the end: empty items, same total
    let page = repos
        .categories()
        .list(&ListParams::new(100, Some(10)))
        .await
        .expect("list");
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 5);
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn empty_search_equals_unfiltered_list(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let cat = repos
        .categories()
        .create(&fixtures::category("Coffee"))
        .await
        .expect("create category");
    for name in ["Latte", "Mocha", "Americano"] {
        repos
            .products()
            .create(&fixtures::product(name, cat.id))
            .await
            .expect("create product");
    }

    let params = ListParams::new(1, Some(2));
    let listed = repos.products().list(&params).await.expect("list");
    let searched = repos
        .products()
        .search(&ProductFilter::default(), &params)
        .await
        .expect("search");

    assert_eq!(searched, listed);

    // A blank q degrades to the same match-all
    let blank = repos
        .products()
        .search(
            &ProductFilter {
                q: Some("   ".to_owned()),
                category_id: None,
            },
            &params,
        )
        .await
        .expect("search");
    assert_eq!(blank, listed);
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn text_search_is_case_insensitive_or_group(pool: PgPool) {
    let repos = Repositories::new(&pool);

    let cat = repos
        .categories()
        .create(&fixtures::category("Coffee"))
        .await
        .expect("create category");
    // "mocha" appears in the name of one and the description of none
    repos
        .products()
        .create(&fixtures::product("Iced Mocha", cat.id))
        .await
        .expect("create product");
    repos
        .products()
        .create(&fixtures::product("Flat White", cat.id))
        .await
        .expect("create product");

    let hits = repos
        .products()
        .search(
            &ProductFilter {
                q: Some("MOCHA".to_owned()),
                category_id: None,
            },
            &ListParams::all(),
        )
        .await
        .expect("search");
    assert_eq!(hits.total_count, 1);
    assert_eq!(hits.items.len(), 1);
    assert_eq!(hits.items.first().map(|p| p.name.as_str()), Some("Iced Mocha"));

    // Description is part of the OR-group: every fixture description
    // contains "A cup of"
    let hits = repos
        .products()
        .search(
            &ProductFilter {
                q: Some("a cup of".to_owned()),
                category_id: Some(cat.id),
            },
            &ListParams::all(),
        )
        .await
        .expect("search");
    assert_eq!(hits.total_count, 2);
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn price_range_bounds_are_inclusive(pool: PgPool) {
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

    for price in ["1.50", "2.00", "3.10", "4.00", "4.50"] {
        repos
            .variants()
            .create(&fixtures::variant("Tall", price, prod.id))
            .await
            .expect("create variant");
    }

    let hits = repos
        .variants()
        .search(
            &VariantFilter {
                min_price: Some("2.00".parse::<Decimal>().expect("decimal")),
                max_price: Some("4.00".parse::<Decimal>().expect("decimal")),
                ..VariantFilter::default()
            },
            &ListParams::all(),
        )
        .await
        .expect("search");

    assert_eq!(hits.total_count, 3, "2.00 and 4.00 are included");
    let prices: HashSet<String> = hits
        .items
        .iter()
        .filter_map(|v| v.price.map(|p| p.to_string()))
        .collect();
    assert_eq!(
        prices,
        HashSet::from(["2.00".to_owned(), "3.10".to_owned(), "4.00".to_owned()])
    );
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn customer_search_combines_text_and_age_range(pool: PgPool) {
    let repos = Repositories::new(&pool);

    for (name, username, age) in [
        ("An Nguyen", "an.n", 22),
        ("An Tran", "an.t", 35),
        ("Binh Le", "binh.l", 28),
    ] {
        let mut new = fixtures::customer(name, username);
        new.age = Some(age);
        repos
            .customers()
            .create(&new)
            .await
            .expect("create customer");
    }

    let hits = repos
        .customers()
        .search(
            &CustomerFilter {
                q: Some("an".to_owned()),
                age_min: Some(22),
                age_max: Some(30),
                ..CustomerFilter::default()
            },
            &ListParams::all(),
        )
        .await
        .expect("search");

    // "an" matches all three names/usernames ("Binh Le"/"binh.l" does not
    // match, but "An Nguyen" and "An Tran" do); the age range then keeps
    // only the 22-year-old.
    assert_eq!(hits.total_count, 1);
    assert_eq!(
        hits.items.first().and_then(|c| c.name.as_deref()),
        Some("An Nguyen")
    );
}

#[sqlx::test(migrations = "../store/migrations")]
#[ignore = "requires a running PostgreSQL database"]
async fn page_mode_windows_and_counts_pages(pool: PgPool) {
    let repos = Repositories::new(&pool);

    for i in 0..25 {
        repos
            .categories()
            .create(&fixtures::category(&format!("Category {i:02}")))
            .await
            .expect("create category");
    }

    let query = PageQuery::new(2, 10);
    let params = query.to_list_params().expect("valid page query");
    let page = repos.categories().list(&params).await.expect("list");
    let response = PagedResponse::new(page, query);

    assert_eq!(response.items.len(), 10);
    assert_eq!(response.total_count, 25);
    assert_eq!(response.total_pages, 3);

    // The three pages tile the table without overlap
    let mut seen = HashSet::new();
    for page_no in 1..=3 {
        let query = PageQuery::new(page_no, 10);
        let params = query.to_list_params().expect("valid page query");
        let page = repos.categories().list(&params).await.expect("list");
        for item in page.items {
            assert!(seen.insert(item.id), "page windows must not overlap");
        }
    }
    assert_eq!(seen.len(), 25);
}
