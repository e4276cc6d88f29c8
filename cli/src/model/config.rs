//! Configuration entry model.
//!
//! An entry is a single key/value pair scoped to one application. Key
//! uniqueness holds per application, not globally.

use serde::Serialize;

/// A stored configuration value together with its identifying pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    /// Owning application name
    pub application: String,

    /// Configuration key, unique within the application
    pub name: String,

    /// Stored value (kept verbatim, may be empty)
    pub value: String,
}

impl ConfigEntry {
    pub fn new(application: &str, name: &str, value: String) -> Self {
        Self {
            application: application.to_string(),
            name: name.to_string(),
            value,
        }
    }
}

/// How a configuration name selects rows on delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Equality on the configuration name.
    #[default]
    Exact,
    /// SQL `LIKE` pattern (`%` any run, `_` one character).
    Like,
}

impl MatchMode {
    /// Build from the `--like` flag.
    #[must_use]
    pub const fn from_like_flag(like: bool) -> Self {
        if like { Self::Like } else { Self::Exact }
    }

    /// Get the string representation for output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Like => "like",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_mode_from_flag() {
        assert_eq!(MatchMode::from_like_flag(false), MatchMode::Exact);
        assert_eq!(MatchMode::from_like_flag(true), MatchMode::Like);
        assert_eq!(MatchMode::default(), MatchMode::Exact);
    }

    #[test]
    fn test_entry_serializes_flat() {
        let entry = ConfigEntry::new("svc", "timeout", "30".to_string());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["application"], "svc");
        assert_eq!(json["name"], "timeout");
        assert_eq!(json["value"], "30");
    }
}
