//! Database path resolution.
//!
//! The default database lives at `<home>/.config.db` so every application of
//! a user shares one file. The home directory is passed in rather than looked
//! up here; `main` supplies it from [`home_dir`], tests supply a temp dir.
//!
//! Priority:
//! 1. Explicit path (`--db` flag or `CONFIGLITE_DB`, both handled by clap)
//! 2. `<home>/.config.db`
//! 3. `/.config.db` when no home directory is known

use std::path::{Path, PathBuf};

/// File name of the shared configuration database.
pub const DEFAULT_DB_FILE: &str = ".config.db";

/// Environment variable overriding the database path.
pub const DB_ENV_VAR: &str = "CONFIGLITE_DB";

/// Get the current user's home directory, if the platform reports one.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf())
}

/// Default database file for the given home directory.
///
/// Falls back to the filesystem root when no home directory is known.
#[must_use]
pub fn default_config_file(home: Option<&Path>) -> PathBuf {
    home.unwrap_or_else(|| Path::new("/")).join(DEFAULT_DB_FILE)
}

/// Resolve the database path.
///
/// An explicit path always wins; blank explicit paths are ignored so an empty
/// `CONFIGLITE_DB=` behaves like an unset variable.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>, home: Option<&Path>) -> PathBuf {
    match explicit_path {
        Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
        _ => default_config_file(home),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_db_path_with_explicit() {
        let explicit = PathBuf::from("/custom/path/db.sqlite");
        let home = PathBuf::from("/home/alice");
        let result = resolve_db_path(Some(&explicit), Some(&home));
        assert_eq!(result, explicit);
    }

    #[test]
    fn test_resolve_db_path_defaults_to_home() {
        let home = PathBuf::from("/home/alice");
        let result = resolve_db_path(None, Some(&home));
        assert_eq!(result, PathBuf::from("/home/alice/.config.db"));
    }

    #[test]
    fn test_resolve_db_path_ignores_blank_explicit() {
        let home = PathBuf::from("/home/alice");
        let result = resolve_db_path(Some(Path::new("")), Some(&home));
        assert_eq!(result, PathBuf::from("/home/alice/.config.db"));
    }

    #[test]
    fn test_default_config_file_without_home() {
        assert_eq!(default_config_file(None), PathBuf::from("/.config.db"));
    }

    #[test]
    fn test_default_config_file_in_temp_home() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_config_file(Some(dir.path()));
        assert!(path.starts_with(dir.path()));
        assert!(path.ends_with(DEFAULT_DB_FILE));
    }
}
