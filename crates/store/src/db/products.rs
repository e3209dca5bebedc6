//! Product repository: CRUD plus free-text/structured search.

use sqlx::PgPool;

use brewline_core::{ListParams, Page, ProductId};

use super::{RepositoryError, Result, bind_u64, map_write_err};
use crate::models::{NewProduct, Product, ProductChanges, ProductFilter};

const COLUMNS: &str = "id, name, description, image_url, category_id";

/// Search predicate shared verbatim by the count and page queries, so the
/// reported total always matches the returned items.
///
/// `$1` is the normalized free-text term (NULL when absent): an OR-group over
/// name and description, matched as a case-insensitive substring. `$2` is the
/// structured category filter, AND-ed in.
const SEARCH_WHERE: &str = "($1::text IS NULL \
        OR name ILIKE '%' || $1 || '%' \
        OR description ILIKE '%' || $1 || '%') \
    AND ($2::uuid IS NULL OR category_id = $2)";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a product, assigning a fresh id.
    ///
    /// The category reference is not pre-validated; a dangling
    /// `category_id` fails at the storage engine with
    /// `RepositoryError::ConstraintViolation`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ConstraintViolation` for a broken category
    /// reference, `RepositoryError::Database` for other failures.
    pub async fn create(&self, new: &NewProduct) -> Result<Product> {
        let sql = format!(
            "INSERT INTO product (id, name, description, image_url, category_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(ProductId::random())
            .bind(new.name.as_str())
            .bind(new.description.as_deref())
            .bind(new.image_url.as_deref())
            .bind(new.category_id)
            .fetch_one(self.pool)
            .await
            .map_err(map_write_err)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such product exists.
    pub async fn get(&self, id: ProductId) -> Result<Product> {
        let sql = format!("SELECT {COLUMNS} FROM product WHERE id = $1");
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// List products with the total row count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Product>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(self.pool)
            .await?;

        let sql = format!("SELECT {COLUMNS} FROM product ORDER BY id LIMIT $1 OFFSET $2");
        let items = sqlx::query_as::<_, Product>(&sql)
            .bind(params.limit.map(bind_u64))
            .bind(bind_u64(params.skip))
            .fetch_all(self.pool)
            .await?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    /// Search products by free text and category.
    ///
    /// An absent/empty text term and no category filter degrade to a plain
    /// match-all list with the same pagination contract.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn search(&self, filter: &ProductFilter, params: &ListParams) -> Result<Page<Product>> {
        let q = filter.text();

        let count_sql = format!("SELECT COUNT(*) FROM product WHERE {SEARCH_WHERE}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(q)
            .bind(filter.category_id)
            .fetch_one(self.pool)
            .await?;

        let page_sql = format!(
            "SELECT {COLUMNS} FROM product WHERE {SEARCH_WHERE} \
             ORDER BY id LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, Product>(&page_sql)
            .bind(q)
            .bind(filter.category_id)
            .bind(params.limit.map(bind_u64))
            .bind(bind_u64(params.skip))
            .fetch_all(self.pool)
            .await?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    /// Apply a change-set, overwriting only the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` for a broken category
    /// reference.
    pub async fn update(&self, id: ProductId, changes: &ProductChanges) -> Result<Product> {
        let sql = format!(
            "UPDATE product \
             SET name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 image_url = COALESCE($4, image_url), \
                 category_id = COALESCE($5, category_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.image_url.as_deref())
            .bind(changes.category_id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_write_err)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` if variants still
    /// reference it (RESTRICT foreign key).
    pub async fn delete(&self, id: ProductId) -> Result<()> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(map_write_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
