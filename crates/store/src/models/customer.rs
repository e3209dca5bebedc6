//! Customer domain types.
//!
//! Password hashing and verification live with an external authentication
//! collaborator; this layer only stores and returns the opaque digest.

use brewline_core::CustomerId;
use serde::{Deserialize, Serialize};

use super::normalize_text;

/// A customer account. Owns many orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    /// Unique customer ID, assigned at creation.
    pub id: CustomerId,
    pub name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub location: Option<String>,
    /// Optional reference to a profile picture.
    pub picture: Option<String>,
    /// Opaque per-customer embedding payload, managed elsewhere.
    pub embedding: Option<String>,
    /// Credential username used for sign-in lookups.
    pub username: Option<String>,
    /// Opaque password digest. Never serialized outward.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// Account activation flag, always present, defaults to true.
    pub is_active: bool,
}

/// Payload for creating a customer.
///
/// `password_hash` is the already-hashed digest; the account starts active.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub picture: Option<String>,
    pub embedding: Option<String>,
    pub username: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
}

/// Partial update for a customer. `None` fields stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub picture: Option<String>,
    pub embedding: Option<String>,
    pub username: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

/// Search filter for customers.
///
/// A non-empty `q` matches name OR username OR location (case-insensitive
/// substring); `location` and the age bounds narrow with AND. Both age bounds
/// are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerFilter {
    /// Free-text term; empty or whitespace-only is treated as absent.
    pub q: Option<String>,
    /// Exact location match.
    pub location: Option<String>,
    /// Inclusive lower age bound.
    pub age_min: Option<i32>,
    /// Inclusive upper age bound.
    pub age_max: Option<i32>,
}

impl CustomerFilter {
    /// The normalized free-text term, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        normalize_text(self.q.as_deref())
    }
}
