//! Customer repository: CRUD, search, and the credential lookup used by the
//! external authentication collaborator.

use sqlx::PgPool;

use brewline_core::{CustomerId, ListParams, Page};

use super::{RepositoryError, Result, bind_u64, map_write_err};
use crate::models::{Customer, CustomerChanges, CustomerFilter, NewCustomer};

const COLUMNS: &str = "id, name, sex, age, location, picture, embedding, \
     username, password_hash, is_active";

/// Search predicate shared verbatim by the count and page queries.
///
/// `$1` is the normalized free-text term over name, username, and location;
/// `$2`-`$4` are the structured filters. Age bounds are inclusive.
const SEARCH_WHERE: &str = "($1::text IS NULL \
        OR name ILIKE '%' || $1 || '%' \
        OR username ILIKE '%' || $1 || '%' \
        OR location ILIKE '%' || $1 || '%') \
    AND ($2::text IS NULL OR location = $2) \
    AND ($3::int4 IS NULL OR age >= $3) \
    AND ($4::int4 IS NULL OR age <= $4)";

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a customer account, assigning a fresh id.
    ///
    /// `password_hash` must already be a digest - hashing is the auth
    /// collaborator's job. The account starts active.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ConstraintViolation` if the username is
    /// already taken, `RepositoryError::Database` for other failures.
    pub async fn create(&self, new: &NewCustomer) -> Result<Customer> {
        let sql = format!(
            "INSERT INTO customer (id, name, sex, age, location, picture, \
                 embedding, username, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&sql)
            .bind(CustomerId::random())
            .bind(new.name.as_deref())
            .bind(new.sex.as_deref())
            .bind(new.age)
            .bind(new.location.as_deref())
            .bind(new.picture.as_deref())
            .bind(new.embedding.as_deref())
            .bind(new.username.as_deref())
            .bind(new.password_hash.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(map_write_err)
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such customer exists.
    pub async fn get(&self, id: CustomerId) -> Result<Customer> {
        let sql = format!("SELECT {COLUMNS} FROM customer WHERE id = $1");
        sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Look up a customer by their unique credential username.
    ///
    /// Entity-or-absent, used during sign-in; absence is not an error here
    /// because the auth collaborator treats it as "invalid credentials".
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Customer>> {
        let sql = format!("SELECT {COLUMNS} FROM customer WHERE username = $1");
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(username)
            .fetch_optional(self.pool)
            .await?;
        Ok(customer)
    }

    /// List customers with the total row count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Customer>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer")
            .fetch_one(self.pool)
            .await?;

        let sql = format!("SELECT {COLUMNS} FROM customer ORDER BY id LIMIT $1 OFFSET $2");
        let items = sqlx::query_as::<_, Customer>(&sql)
            .bind(params.limit.map(bind_u64))
            .bind(bind_u64(params.skip))
            .fetch_all(self.pool)
            .await?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    /// Search customers by free text, location, and inclusive age range.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn search(
        &self,
        filter: &CustomerFilter,
        params: &ListParams,
    ) -> Result<Page<Customer>> {
        let q = filter.text();

        let count_sql = format!("SELECT COUNT(*) FROM customer WHERE {SEARCH_WHERE}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(q)
            .bind(filter.location.as_deref())
            .bind(filter.age_min)
            .bind(filter.age_max)
            .fetch_one(self.pool)
            .await?;

        let page_sql = format!(
            "SELECT {COLUMNS} FROM customer WHERE {SEARCH_WHERE} \
             ORDER BY id LIMIT $5 OFFSET $6"
        );
        let items = sqlx::query_as::<_, Customer>(&page_sql)
            .bind(q)
            .bind(filter.location.as_deref())
            .bind(filter.age_min)
            .bind(filter.age_max)
            .bind(params.limit.map(bind_u64))
            .bind(bind_u64(params.skip))
            .fetch_all(self.pool)
            .await?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    /// Apply a change-set, overwriting only the supplied fields.
    ///
    /// A new `password_hash` must already be a digest.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    pub async fn update(&self, id: CustomerId, changes: &CustomerChanges) -> Result<Customer> {
        let sql = format!(
            "UPDATE customer \
             SET name = COALESCE($2, name), \
                 sex = COALESCE($3, sex), \
                 age = COALESCE($4, age), \
                 location = COALESCE($5, location), \
                 picture = COALESCE($6, picture), \
                 embedding = COALESCE($7, embedding), \
                 username = COALESCE($8, username), \
                 password_hash = COALESCE($9, password_hash), \
                 is_active = COALESCE($10, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.sex.as_deref())
            .bind(changes.age)
            .bind(changes.location.as_deref())
            .bind(changes.picture.as_deref())
            .bind(changes.embedding.as_deref())
            .bind(changes.username.as_deref())
            .bind(changes.password_hash.as_deref())
            .bind(changes.is_active)
            .fetch_optional(self.pool)
            .await
            .map_err(map_write_err)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::ConstraintViolation` if orders still
    /// reference them (RESTRICT foreign key).
    pub async fn delete(&self, id: CustomerId) -> Result<()> {
        let result = sqlx::query("DELETE FROM customer WHERE id = $1")
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
