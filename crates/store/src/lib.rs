//! Brewline store - the repository and query layer.
//!
//! This crate owns the relational core of the ordering backend: the entity
//! schema, per-entity repositories with a consistent `(items, total_count)`
//! pagination contract, dynamic search predicates, eager loading of nested
//! relations, batch lookups, and surfacing of foreign-key constraint
//! violations.
//!
//! Request routing, input validation, session handling, and password hashing
//! are external collaborators; this crate assumes well-formed inputs and
//! exposes only storage semantics.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
