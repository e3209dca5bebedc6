//! Store-location repository.

use sqlx::PgPool;

use brewline_core::{ListParams, Page, StoreId};

use super::{RepositoryError, Result, bind_u64, map_write_err};
use crate::models::{NewStore, Store, StoreChanges};

const COLUMNS: &str = "id, name, address, phone, hours";

/// Repository for store-location database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a store, assigning a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewStore) -> Result<Store> {
        let sql = format!(
            "INSERT INTO store (id, name, address, phone, hours) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&sql)
            .bind(StoreId::random())
            .bind(new.name.as_str())
            .bind(new.address.as_deref())
            .bind(new.phone.as_deref())
            .bind(new.hours.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(map_write_err)
    }

    /// Get a store by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such store exists.
    pub async fn get(&self, id: StoreId) -> Result<Store> {
        let sql = format!("SELECT {COLUMNS} FROM store WHERE id = $1");
        sqlx::query_as::<_, Store>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// List stores with the total row count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Store>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM store")
            .fetch_one(self.pool)
            .await?;

        let sql = format!("SELECT {COLUMNS} FROM store ORDER BY id LIMIT $1 OFFSET $2");
        let items = sqlx::query_as::<_, Store>(&sql)
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
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    pub async fn update(&self, id: StoreId, changes: &StoreChanges) -> Result<Store> {
        let sql = format!(
            "UPDATE store \
             SET name = COALESCE($2, name), \
                 address = COALESCE($3, address), \
                 phone = COALESCE($4, phone), \
                 hours = COALESCE($5, hours) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.address.as_deref())
            .bind(changes.phone.as_deref())
            .bind(changes.hours.as_deref())
            .fetch_optional(self.pool)
            .await
            .map_err(map_write_err)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` if orders still
    /// reference it (RESTRICT foreign key).
    pub async fn delete(&self, id: StoreId) -> Result<()> {
        let result = sqlx::query("DELETE FROM store WHERE id = $1")
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
