//! Order line-item domain types.

use brewline_core::{OrderDetailId, OrderId, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Variant;

/// One line item of an order, referencing the ordered variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderDetail {
    /// Unique line-item ID, assigned at creation.
    pub id: OrderDetailId,
    pub quantity: i32,
    pub rate: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    /// Owning order (required foreign key).
    pub order_id: OrderId,
    /// Ordered variant (required foreign key).
    pub variant_id: VariantId,
}

/// Payload for creating a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderDetail {
    pub quantity: i32,
    pub rate: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub order_id: OrderId,
    pub variant_id: VariantId,
}

/// Partial update for a line item. `None` fields stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderDetailChanges {
    pub quantity: Option<i32>,
    pub rate: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub order_id: Option<OrderId>,
    pub variant_id: Option<VariantId>,
}

/// A line item with its variant eagerly loaded.
///
/// Populated by a single joined query - reading a page of these never issues
/// one variant lookup per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetailWithVariant {
    #[serde(flatten)]
    pub detail: OrderDetail,
    pub variant: Variant,
}
