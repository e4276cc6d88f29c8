//! Data models for configlite.
//!
//! This module contains the domain models:
//! - ConfigEntry
//! - MatchMode

pub mod config;

pub use config::{ConfigEntry, MatchMode};
