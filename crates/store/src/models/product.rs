//! Product domain types.

use brewline_core::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

use super::normalize_text;

/// A sellable product. Belongs to one category, owns many variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID, assigned at creation.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional reference to a product image.
    pub image_url: Option<String>,
    /// Owning category (required foreign key).
    pub category_id: CategoryId,
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: CategoryId,
}

/// Partial update for a product. `None` fields stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<CategoryId>,
}

/// Search filter for products.
///
/// A non-empty `q` matches name OR description (case-insensitive substring);
/// `category_id` narrows with AND.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Free-text term; empty or whitespace-only is treated as absent.
    pub q: Option<String>,
    /// Restrict to one category.
    pub category_id: Option<CategoryId>,
}

impl ProductFilter {
    /// The normalized free-text term, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        normalize_text(self.q.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_means_no_text_predicate() {
        let filter = ProductFilter {
            q: Some("  ".to_owned()),
            category_id: None,
        };
        assert_eq!(filter.text(), None);

        let filter = ProductFilter {
            q: Some(" mocha ".to_owned()),
            category_id: None,
        };
        assert_eq!(filter.text(), Some("mocha"));
    }
}
