//! Brewline Core - Shared types library.
//!
//! This crate provides common types used across all Brewline components:
//! - `store` - Repository and query layer over `PostgreSQL`
//! - `integration-tests` - Database-backed property tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. This
//! keeps it lightweight and allows it to be used anywhere, including from
//! collaborators that never touch the database.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and pagination types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
