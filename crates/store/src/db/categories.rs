//! Category repository.

use sqlx::PgPool;

use brewline_core::{CategoryId, ListParams, Page};

use super::{RepositoryError, Result, bind_u64, map_write_err};
use crate::models::{Category, CategoryChanges, NewCategory};

const COLUMNS: &str = "id, name, description";

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a category, assigning a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewCategory) -> Result<Category> {
        let sql = format!(
            "INSERT INTO category (id, name, description) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(CategoryId::random())
            .bind(new.name.as_str())
            .bind(new.description.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(map_write_err)
    }

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such category exists.
    pub async fn get(&self, id: CategoryId) -> Result<Category> {
        let sql = format!("SELECT {COLUMNS} FROM category WHERE id = $1");
        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// List categories with the total row count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Category>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM category")
            .fetch_one(self.pool)
            .await?;

        let sql = format!("SELECT {COLUMNS} FROM category ORDER BY id LIMIT $1 OFFSET $2");
        let items = sqlx::query_as::<_, Category>(&sql)
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
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    pub async fn update(&self, id: CategoryId, changes: &CategoryChanges) -> Result<Category> {
        let sql = format!(
            "UPDATE category \
             SET name = COALESCE($2, name), \
                 description = COALESCE($3, description) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .fetch_optional(self.pool)
            .await
            .map_err(map_write_err)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` if products still
    /// reference it (RESTRICT foreign key).
    pub async fn delete(&self, id: CategoryId) -> Result<()> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
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
