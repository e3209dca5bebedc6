//! Variant domain types.
//!
//! A variant is one orderable preparation of a product (size, milk, etc.)
//! carrying nutritional figures and the price.

use brewline_core::{ProductId, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::normalize_text;

/// One orderable variant of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Variant {
    /// Unique variant ID, assigned at creation.
    pub id: VariantId,
    /// Preparation label, e.g. "Grande - 2% Milk".
    pub beverage_option: Option<String>,
    pub calories: Option<f64>,
    pub dietary_fibre_g: Option<f64>,
    pub sugars_g: Option<f64>,
    pub protein_g: Option<f64>,
    pub vitamin_a: Option<String>,
    pub vitamin_c: Option<String>,
    pub caffeine_mg: Option<f64>,
    /// Unit price.
    pub price: Option<Decimal>,
    pub sales_rank: Option<i32>,
    /// Owning product (required foreign key).
    pub product_id: ProductId,
}

/// Payload for creating a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVariant {
    pub beverage_option: Option<String>,
    pub calories: Option<f64>,
    pub dietary_fibre_g: Option<f64>,
    pub sugars_g: Option<f64>,
    pub protein_g: Option<f64>,
    pub vitamin_a: Option<String>,
    pub vitamin_c: Option<String>,
    pub caffeine_mg: Option<f64>,
    pub price: Option<Decimal>,
    pub sales_rank: Option<i32>,
    /// Owning product (required foreign key).
    pub product_id: ProductId,
}

/// Partial update for a variant. `None` fields stay untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariantChanges {
    pub beverage_option: Option<String>,
    pub calories: Option<f64>,
    pub dietary_fibre_g: Option<f64>,
    pub sugars_g: Option<f64>,
    pub protein_g: Option<f64>,
    pub vitamin_a: Option<String>,
    pub vitamin_c: Option<String>,
    pub caffeine_mg: Option<f64>,
    pub price: Option<Decimal>,
    pub sales_rank: Option<i32>,
    pub product_id: Option<ProductId>,
}

/// Search filter for variants.
///
/// A non-empty `q` matches the beverage option (case-insensitive substring);
/// `product_id` and the price bounds narrow with AND. Both price bounds are
/// inclusive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariantFilter {
    /// Free-text term; empty or whitespace-only is treated as absent.
    pub q: Option<String>,
    /// Restrict to one product.
    pub product_id: Option<ProductId>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl VariantFilter {
    /// The normalized free-text term, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        normalize_text(self.q.as_deref())
    }
}
