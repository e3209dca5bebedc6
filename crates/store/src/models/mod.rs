//! Domain types for the catalog/order entity graph.
//!
//! Each entity module carries:
//!
//! - the entity struct itself (a persisted row, `sqlx::FromRow`),
//! - a `New*` creation payload (the repository assigns the id),
//! - a `*Changes` change-set for partial updates - every field is an
//!   `Option`, `None` leaves the stored value untouched,
//! - for searchable entities, a filter struct consumed by the repository's
//!   `search` operation.

pub mod category;
pub mod customer;
pub mod order;
pub mod order_detail;
pub mod product;
pub mod store;
pub mod variant;

pub use category::{Category, CategoryChanges, NewCategory};
pub use customer::{Customer, CustomerChanges, CustomerFilter, NewCustomer};
pub use order::{NewOrder, Order, OrderChanges};
pub use order_detail::{NewOrderDetail, OrderDetail, OrderDetailChanges, OrderDetailWithVariant};
pub use product::{NewProduct, Product, ProductChanges, ProductFilter};
pub use store::{NewStore, Store, StoreChanges};
pub use variant::{NewVariant, Variant, VariantChanges, VariantFilter};

/// Normalize a free-text search term: trim whitespace and treat the empty
/// string as "no text filter".
#[must_use]
pub(crate) fn normalize_text(q: Option<&str>) -> Option<&str> {
    q.map(str::trim).filter(|term| !term.is_empty())
}

#[cfg(test)]
mod tests {
    use super::normalize_text;

    #[test]
    fn empty_and_blank_terms_are_absent() {
        assert_eq!(normalize_text(None), None);
        assert_eq!(normalize_text(Some("")), None);
        assert_eq!(normalize_text(Some("   ")), None);
        assert_eq!(normalize_text(Some(" latte ")), Some("latte"));
    }
}
