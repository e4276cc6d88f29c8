//! SQLite storage layer for configlite.
//!
//! - WAL mode so readers do not block the single writer
//! - IMMEDIATE transactions for writes spanning both tables
//! - Versioned migrations applied on every open
//!
//! # Submodules
//!
//! - [`migrations`] - Embedded schema migrations
//! - [`repository`] - Application and configuration operations

pub mod migrations;
pub mod repository;

pub use repository::Repository;
