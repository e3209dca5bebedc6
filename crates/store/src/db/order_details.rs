//! Order line-item repository, including the eager-loaded variant projection.
//!
//! Every read shape that nests the variant is produced by a single joined
//! query - a page of line items never issues one variant lookup per row.

use rust_decimal::Decimal;
use sqlx::PgPool;

use brewline_core::{ListParams, OrderDetailId, OrderId, Page, ProductId, VariantId};

use super::{RepositoryError, Result, bind_u64, map_write_err};
use crate::models::{
    NewOrderDetail, OrderDetail, OrderDetailChanges, OrderDetailWithVariant, Variant,
};

const COLUMNS: &str = "id, quantity, rate, unit_price, order_id, variant_id";

/// Joined projection columns; variant columns are prefixed `v_` to avoid
/// clashing with the line item's own `id` and `variant_id`.
const JOINED_COLUMNS: &str = "d.id, d.quantity, d.rate, d.unit_price, d.order_id, d.variant_id, \
     v.id AS v_id, v.beverage_option AS v_beverage_option, v.calories AS v_calories, \
     v.dietary_fibre_g AS v_dietary_fibre_g, v.sugars_g AS v_sugars_g, \
     v.protein_g AS v_protein_g, v.vitamin_a AS v_vitamin_a, v.vitamin_c AS v_vitamin_c, \
     v.caffeine_mg AS v_caffeine_mg, v.price AS v_price, v.sales_rank AS v_sales_rank, \
     v.product_id AS v_product_id";

/// Optional per-order restriction, shared verbatim by the joined page query
/// and its count.
const ORDER_WHERE: &str = "($1::uuid IS NULL OR d.order_id = $1)";

/// One joined row: the line item plus its variant, flattened.
#[derive(sqlx::FromRow)]
struct JoinedRow {
    id: OrderDetailId,
    quantity: i32,
    rate: Option<Decimal>,
    unit_price: Option<Decimal>,
    order_id: OrderId,
    variant_id: VariantId,
    v_id: VariantId,
    v_beverage_option: Option<String>,
    v_calories: Option<f64>,
    v_dietary_fibre_g: Option<f64>,
    v_sugars_g: Option<f64>,
    v_protein_g: Option<f64>,
    v_vitamin_a: Option<String>,
    v_vitamin_c: Option<String>,
    v_caffeine_mg: Option<f64>,
    v_price: Option<Decimal>,
    v_sales_rank: Option<i32>,
    v_product_id: ProductId,
}

impl From<JoinedRow> for OrderDetailWithVariant {
    fn from(row: JoinedRow) -> Self {
        Self {
            detail: OrderDetail {
                id: row.id,
                quantity: row.quantity,
                rate: row.rate,
                unit_price: row.unit_price,
                order_id: row.order_id,
                variant_id: row.variant_id,
            },
            variant: Variant {
                id: row.v_id,
                beverage_option: row.v_beverage_option,
                calories: row.v_calories,
                dietary_fibre_g: row.v_dietary_fibre_g,
                sugars_g: row.v_sugars_g,
                protein_g: row.v_protein_g,
                vitamin_a: row.v_vitamin_a,
                vitamin_c: row.v_vitamin_c,
                caffeine_mg: row.v_caffeine_mg,
                price: row.v_price,
                sales_rank: row.v_sales_rank,
                product_id: row.v_product_id,
            },
        }
    }
}

/// Repository for order line-item database operations.
pub struct OrderDetailRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderDetailRepository<'a> {
    /// Create a new line-item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a line item, assigning a fresh id.
    ///
    /// Order and variant references are not pre-validated; a dangling
    /// reference fails at the storage engine and nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ConstraintViolation` for a broken order or
    /// variant reference, `RepositoryError::Database` for other failures.
    pub async fn create(&self, new: &NewOrderDetail) -> Result<OrderDetail> {
        let sql = format!(
            "INSERT INTO order_detail (id, quantity, rate, unit_price, order_id, variant_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderDetail>(&sql)
            .bind(OrderDetailId::random())
            .bind(new.quantity)
            .bind(new.rate)
            .bind(new.unit_price)
            .bind(new.order_id)
            .bind(new.variant_id)
            .fetch_one(self.pool)
            .await
            .map_err(map_write_err)
    }

    /// Get a line item by id, without the variant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such line item exists.
    pub async fn get(&self, id: OrderDetailId) -> Result<OrderDetail> {
        let sql = format!("SELECT {COLUMNS} FROM order_detail WHERE id = $1");
        sqlx::query_as::<_, OrderDetail>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Get a line item by id with its variant eagerly loaded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such line item exists.
    pub async fn get_with_variant(&self, id: OrderDetailId) -> Result<OrderDetailWithVariant> {
        let sql = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM order_detail d \
             JOIN variant v ON v.id = d.variant_id \
             WHERE d.id = $1"
        );
        let row = sqlx::query_as::<_, JoinedRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// List line items with the total row count, without variants.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, params: &ListParams) -> Result<Page<OrderDetail>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_detail")
            .fetch_one(self.pool)
            .await?;

        let sql = format!("SELECT {COLUMNS} FROM order_detail ORDER BY id LIMIT $1 OFFSET $2");
        let items = sqlx::query_as::<_, OrderDetail>(&sql)
            .bind(params.limit.map(bind_u64))
            .bind(bind_u64(params.skip))
            .fetch_all(self.pool)
            .await?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    /// List line items with variants eagerly loaded, optionally restricted
    /// to one order.
    ///
    /// One joined page query plus one count query, regardless of page size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_with_variant(
        &self,
        order_id: Option<OrderId>,
        params: &ListParams,
    ) -> Result<Page<OrderDetailWithVariant>> {
        let count_sql = format!("SELECT COUNT(*) FROM order_detail d WHERE {ORDER_WHERE}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(order_id)
            .fetch_one(self.pool)
            .await?;

        let page_sql = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM order_detail d \
             JOIN variant v ON v.id = d.variant_id \
             WHERE {ORDER_WHERE} \
             ORDER BY d.id LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, JoinedRow>(&page_sql)
            .bind(order_id)
            .bind(params.limit.map(bind_u64))
            .bind(bind_u64(params.skip))
            .fetch_all(self.pool)
            .await?;

        let items = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    /// Apply a change-set, overwriting only the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line item doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` for a broken order or
    /// variant reference.
    pub async fn update(
        &self,
        id: OrderDetailId,
        changes: &OrderDetailChanges,
    ) -> Result<OrderDetail> {
        let sql = format!(
            "UPDATE order_detail \
             SET quantity = COALESCE($2, quantity), \
                 rate = COALESCE($3, rate), \
                 unit_price = COALESCE($4, unit_price), \
                 order_id = COALESCE($5, order_id), \
                 variant_id = COALESCE($6, variant_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderDetail>(&sql)
            .bind(id)
            .bind(changes.quantity)
            .bind(changes.rate)
            .bind(changes.unit_price)
            .bind(changes.order_id)
            .bind(changes.variant_id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_write_err)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a line item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line item doesn't exist.
    pub async fn delete(&self, id: OrderDetailId) -> Result<()> {
        let result = sqlx::query("DELETE FROM order_detail WHERE id = $1")
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
