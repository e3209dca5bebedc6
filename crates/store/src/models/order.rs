//! Order domain types.

use brewline_core::{CustomerId, OrderId, StoreId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A placed order. Belongs to one customer and one store, owns many
/// [`OrderDetail`](super::OrderDetail)s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID, assigned at creation.
    pub id: OrderId,
    pub order_date: DateTime<Utc>,
    pub total_amount: Option<Decimal>,
    /// Ordering customer (required foreign key).
    pub customer_id: CustomerId,
    /// Fulfilling store (required foreign key).
    pub store_id: StoreId,
}

/// Payload for creating an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Defaults to the current time when omitted.
    pub order_date: Option<DateTime<Utc>>,
    pub total_amount: Option<Decimal>,
    pub customer_id: CustomerId,
    pub store_id: StoreId,
}

/// Partial update for an order. `None` fields stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderChanges {
    pub order_date: Option<DateTime<Utc>>,
    pub total_amount: Option<Decimal>,
    pub customer_id: Option<CustomerId>,
    pub store_id: Option<StoreId>,
}
