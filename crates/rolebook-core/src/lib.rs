//! Core types and trait definitions for the rolebook service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod error;
pub mod role;
pub mod store;
pub mod user_role;

pub use error::{Error, Result};
