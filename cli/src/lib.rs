//! configlite - shared application configuration stored in SQLite
//!
//! Applications register under a name and keep string key/value settings in
//! a single database file that several programs can share.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (ConfigEntry, MatchMode)
//! - [`storage`] - SQLite repository and schema migrations
//! - [`config`] - Database path resolution
//! - [`validate`] - Name validation and key suggestions
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};
pub use model::{ConfigEntry, MatchMode};
pub use storage::Repository;
