//! Store (physical location) domain types.

use brewline_core::StoreId;
use serde::{Deserialize, Serialize};

/// A physical store location. Owns many orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Store {
    /// Unique store ID, assigned at creation.
    pub id: StoreId,
    /// Display name.
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Opening hours, e.g. "07:00-21:00".
    pub hours: Option<String>,
}

/// Payload for creating a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStore {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<String>,
}

/// Partial update for a store. `None` fields stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<String>,
}
