//! Database operations for the Brewline `PostgreSQL` schema.
//!
//! ## Tables
//!
//! - `category` - Product categories
//! - `product` - Sellable products (FK to `category`)
//! - `variant` - Orderable preparations with price/nutrition (FK to `product`)
//! - `customer` - Customer accounts with credential fields
//! - `store` - Physical store locations
//! - `orders` - Placed orders (FKs to `customer` and `store`)
//! - `order_detail` - Order line items (FKs to `orders` and `variant`)
//!
//! All foreign keys are declared `ON DELETE RESTRICT`; deleting a parent with
//! live children surfaces as [`RepositoryError::ConstraintViolation`]. The
//! repositories never pre-validate references - integrity is enforced by the
//! storage engine and surfaced at commit time.
//!
//! # Schema
//!
//! The schema lives in `crates/store/migrations/` and is applied by the test
//! harness (and by whatever deploys the database); this library assumes the
//! tables exist.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use brewline_core::PageError;

mod categories;
mod customers;
mod order_details;
mod orders;
mod products;
mod stores;
mod variants;

pub use categories::CategoryRepository;
pub use customers::CustomerRepository;
pub use order_details::OrderDetailRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use stores::StoreRepository;
pub use variants::VariantRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    ///
    /// Raised only for single-entity lookups; list/search scans simply
    /// return zero rows.
    #[error("not found")]
    NotFound,

    /// The storage engine rejected a write that breaks a declared
    /// foreign-key or uniqueness rule. Carries the engine's message.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Malformed pagination arguments.
    #[error("invalid request: {0}")]
    Validation(#[from] PageError),
}

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool is the only shared resource: repositories borrow it per request,
/// and connections return to it on every exit path.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &crate::config::StoreConfig) -> std::result::Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max_connections = config.max_connections,
        "connecting to PostgreSQL"
    );
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(config.database_url.expose_secret())
        .await
}

/// Map a write failure, converting storage-engine constraint rejections
/// into [`RepositoryError::ConstraintViolation`].
fn map_write_err(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && (db_err.is_foreign_key_violation() || db_err.is_unique_violation())
    {
        tracing::debug!(error = %db_err, "constraint violation");
        return RepositoryError::ConstraintViolation(db_err.message().to_owned());
    }
    RepositoryError::Database(e)
}

/// Clamp an unsigned pagination value into the `i64` range Postgres binds.
const fn bind_u64(value: u64) -> i64 {
    // An offset past the end of any real table just yields an empty page.
    if value > i64::MAX as u64 {
        i64::MAX
    } else {
        value as i64
    }
}

/// Repository facade: one handle per entity type over a borrowed pool.
///
/// Cheap to construct; make one per request scope.
pub struct Repositories<'a> {
    pool: &'a PgPool,
}

impl<'a> Repositories<'a> {
    /// Create a facade over a pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Category CRUD.
    #[must_use]
    pub const fn categories(&self) -> CategoryRepository<'a> {
        CategoryRepository::new(self.pool)
    }

    /// Product CRUD and search.
    #[must_use]
    pub const fn products(&self) -> ProductRepository<'a> {
        ProductRepository::new(self.pool)
    }

    /// Variant CRUD, search, and batch lookup.
    #[must_use]
    pub const fn variants(&self) -> VariantRepository<'a> {
        VariantRepository::new(self.pool)
    }

    /// Customer CRUD, search, and credential lookup.
    #[must_use]
    pub const fn customers(&self) -> CustomerRepository<'a> {
        CustomerRepository::new(self.pool)
    }

    /// Store CRUD.
    #[must_use]
    pub const fn stores(&self) -> StoreRepository<'a> {
        StoreRepository::new(self.pool)
    }

    /// Order CRUD.
    #[must_use]
    pub const fn orders(&self) -> OrderRepository<'a> {
        OrderRepository::new(self.pool)
    }

    /// Order line-item CRUD with variant eager loading.
    #[must_use]
    pub const fn order_details(&self) -> OrderDetailRepository<'a> {
        OrderDetailRepository::new(self.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::bind_u64;

    #[test]
    fn bind_u64_clamps_to_i64_range() {
        assert_eq!(bind_u64(0), 0);
        assert_eq!(bind_u64(10), 10);
        assert_eq!(bind_u64(u64::MAX), i64::MAX);
    }
}
