//! # Infrastructure Layer
//!
//! Adapters behind the application-layer ports: the live carrier client,
//! the quote cache, and label storage.

pub mod carriers;
pub mod labels;
pub mod persistence;
