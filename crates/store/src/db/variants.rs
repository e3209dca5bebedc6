//! Variant repository: CRUD, price/text search, and batch lookup.

use sqlx::PgPool;
use uuid::Uuid;

use brewline_core::{ListParams, Page, VariantId};

use super::{RepositoryError, Result, bind_u64, map_write_err};
use crate::models::{NewVariant, Variant, VariantChanges, VariantFilter};

const COLUMNS: &str = "id, beverage_option, calories, dietary_fibre_g, sugars_g, \
     protein_g, vitamin_a, vitamin_c, caffeine_mg, price, sales_rank, product_id";

/// Search predicate shared verbatim by the count and page queries.
///
/// `$1` is the normalized free-text term over the beverage option; `$2`-`$4`
/// are the structured filters. Price bounds are inclusive on both ends.
const SEARCH_WHERE: &str = "($1::text IS NULL OR beverage_option ILIKE '%' || $1 || '%') \
    AND ($2::uuid IS NULL OR product_id = $2) \
    AND ($3::numeric IS NULL OR price >= $3) \
    AND ($4::numeric IS NULL OR price <= $4)";

/// Repository for variant database operations.
pub struct VariantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VariantRepository<'a> {
    /// Create a new variant repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a variant, assigning a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ConstraintViolation` for a broken product
    /// reference, `RepositoryError::Database` for other failures.
    pub async fn create(&self, new: &NewVariant) -> Result<Variant> {
        let sql = format!(
            "INSERT INTO variant (id, beverage_option, calories, dietary_fibre_g, \
                 sugars_g, protein_g, vitamin_a, vitamin_c, caffeine_mg, price, \
                 sales_rank, product_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Variant>(&sql)
            .bind(VariantId::random())
            .bind(new.beverage_option.as_deref())
            .bind(new.calories)
            .bind(new.dietary_fibre_g)
            .bind(new.sugars_g)
            .bind(new.protein_g)
            .bind(new.vitamin_a.as_deref())
            .bind(new.vitamin_c.as_deref())
            .bind(new.caffeine_mg)
            .bind(new.price)
            .bind(new.sales_rank)
            .bind(new.product_id)
            .fetch_one(self.pool)
            .await
            .map_err(map_write_err)
    }

    /// Get a variant by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such variant exists.
    pub async fn get(&self, id: VariantId) -> Result<Variant> {
        let sql = format!("SELECT {COLUMNS} FROM variant WHERE id = $1");
        sqlx::query_as::<_, Variant>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// List variants with the total row count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Variant>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM variant")
            .fetch_one(self.pool)
            .await?;

        let sql = format!("SELECT {COLUMNS} FROM variant ORDER BY id LIMIT $1 OFFSET $2");
        let items = sqlx::query_as::<_, Variant>(&sql)
            .bind(params.limit.map(bind_u64))
            .bind(bind_u64(params.skip))
            .fetch_all(self.pool)
            .await?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    /// Search variants by beverage option, product, and inclusive price range.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn search(&self, filter: &VariantFilter, params: &ListParams) -> Result<Page<Variant>> {
        let q = filter.text();

        let count_sql = format!("SELECT COUNT(*) FROM variant WHERE {SEARCH_WHERE}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(q)
            .bind(filter.product_id)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_one(self.pool)
            .await?;

        let page_sql = format!(
            "SELECT {COLUMNS} FROM variant WHERE {SEARCH_WHERE} \
             ORDER BY id LIMIT $5 OFFSET $6"
        );
        let items = sqlx::query_as::<_, Variant>(&page_sql)
            .bind(q)
            .bind(filter.product_id)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(params.limit.map(bind_u64))
            .bind(bind_u64(params.skip))
            .fetch_all(self.pool)
            .await?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    /// Fetch many variants by id in one round trip.
    ///
    /// An empty input returns immediately without touching the database.
    /// Ids with no matching row are silently dropped. Results come back
    /// ordered by id - callers must not rely on input order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_ids(&self, ids: &[VariantId]) -> Result<Vec<Variant>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();
        let sql = format!("SELECT {COLUMNS} FROM variant WHERE id = ANY($1) ORDER BY id");
        let variants = sqlx::query_as::<_, Variant>(&sql)
            .bind(raw)
            .fetch_all(self.pool)
            .await?;

        Ok(variants)
    }

    /// Apply a change-set, overwriting only the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the variant doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` for a broken product
    /// reference.
    pub async fn update(&self, id: VariantId, changes: &VariantChanges) -> Result<Variant> {
        let sql = format!(
            "UPDATE variant \
             SET beverage_option = COALESCE($2, beverage_option), \
                 calories = COALESCE($3, calories), \
                 dietary_fibre_g = COALESCE($4, dietary_fibre_g), \
                 sugars_g = COALESCE($5, sugars_g), \
                 protein_g = COALESCE($6, protein_g), \
                 vitamin_a = COALESCE($7, vitamin_a), \
                 vitamin_c = COALESCE($8, vitamin_c), \
                 caffeine_mg = COALESCE($9, caffeine_mg), \
                 price = COALESCE($10, price), \
                 sales_rank = COALESCE($11, sales_rank), \
                 product_id = COALESCE($12, product_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Variant>(&sql)
            .bind(id)
            .bind(changes.beverage_option.as_deref())
            .bind(changes.calories)
            .bind(changes.dietary_fibre_g)
            .bind(changes.sugars_g)
            .bind(changes.protein_g)
            .bind(changes.vitamin_a.as_deref())
            .bind(changes.vitamin_c.as_deref())
            .bind(changes.caffeine_mg)
            .bind(changes.price)
            .bind(changes.sales_rank)
            .bind(changes.product_id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_write_err)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a variant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the variant doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` if order line items
    /// still reference it (RESTRICT foreign key).
    pub async fn delete(&self, id: VariantId) -> Result<()> {
        let result = sqlx::query("DELETE FROM variant WHERE id = $1")
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
