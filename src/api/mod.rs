//! # API Layer
//!
//! External surfaces of the service.

pub mod rest;
