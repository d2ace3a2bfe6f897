//! # Domain Layer
//!
//! Entities and value objects with no dependencies on infrastructure.
//!
//! Everything here is plain data with invariants: addresses are trimmed and
//! complete, costs are non-negative cents, quote records are immutable once
//! created.

pub mod entities;
pub mod value_objects;
