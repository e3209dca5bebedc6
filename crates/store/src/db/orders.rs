//! Order repository.

use sqlx::PgPool;

use brewline_core::{CustomerId, ListParams, OrderId, Page};

use super::{RepositoryError, Result, bind_u64, map_write_err};
use crate::models::{NewOrder, Order, OrderChanges};

const COLUMNS: &str = "id, order_date, total_amount, customer_id, store_id";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order, assigning a fresh id.
    ///
    /// `order_date` defaults to now when omitted. Customer and store
    /// references are not pre-validated; the storage engine rejects dangling
    /// ones at commit time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ConstraintViolation` for a broken customer
    /// or store reference, `RepositoryError::Database` for other failures.
    pub async fn create(&self, new: &NewOrder) -> Result<Order> {
        let order_date = new.order_date.unwrap_or_else(chrono::Utc::now);
        let sql = format!(
            "INSERT INTO orders (id, order_date, total_amount, customer_id, store_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&sql)
            .bind(OrderId::random())
            .bind(order_date)
            .bind(new.total_amount)
            .bind(new.customer_id)
            .bind(new.store_id)
            .fetch_one(self.pool)
            .await
            .map_err(map_write_err)
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such order exists.
    pub async fn get(&self, id: OrderId) -> Result<Order> {
        let sql = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// List orders with the total row count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Order>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await?;

        let sql = format!("SELECT {COLUMNS} FROM orders ORDER BY id LIMIT $1 OFFSET $2");
        let items = sqlx::query_as::<_, Order>(&sql)
            .bind(params.limit.map(bind_u64))
            .bind(bind_u64(params.skip))
            .fetch_all(self.pool)
            .await?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    /// List one customer's orders with the matching total.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
        params: &ListParams,
    ) -> Result<Page<Order>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(self.pool)
            .await?;

        let sql = format!(
            "SELECT {COLUMNS} FROM orders WHERE customer_id = $1 \
             ORDER BY id LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, Order>(&sql)
            .bind(customer_id)
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
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` for a broken customer
    /// or store reference.
    pub async fn update(&self, id: OrderId, changes: &OrderChanges) -> Result<Order> {
        let sql = format!(
            "UPDATE orders \
             SET order_date = COALESCE($2, order_date), \
                 total_amount = COALESCE($3, total_amount), \
                 customer_id = COALESCE($4, customer_id), \
                 store_id = COALESCE($5, store_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .bind(changes.order_date)
            .bind(changes.total_amount)
            .bind(changes.customer_id)
            .bind(changes.store_id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_write_err)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` if line items still
    /// reference it (RESTRICT foreign key).
    pub async fn delete(&self, id: OrderId) -> Result<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
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
