//! Command implementations.

pub mod apps;
pub mod completions;
pub mod configs;
pub mod version;

use crate::config::{home_dir, resolve_db_path};
use crate::error::Result;
use crate::storage::Repository;
use std::path::PathBuf;

/// Open the repository selected by `--db`, falling back to `~/.config.db`.
///
/// # Errors
///
/// Returns `Open` or `Migration` if the database cannot be prepared.
pub fn open_repository(db_path: Option<&PathBuf>) -> Result<Repository> {
    let home = home_dir();
    let path = resolve_db_path(db_path.map(PathBuf::as_path), home.as_deref());
    tracing::debug!(path = %path.display(), "Using configuration database");
    Repository::open(&path)
}
