//! Category domain types.

use brewline_core::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category. Owns many [`Product`](super::Product)s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID, assigned at creation.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update for a category. `None` fields stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}
