//! Input validation and near-miss suggestions.
//!
//! Names are checked before they reach the database so a typo'd empty
//! argument never creates a blank application or key. Misses on lookup can
//! be turned into "did you mean" suggestions with [`find_similar_keys`].

use crate::error::{Error, Result};

/// Validate an application name.
///
/// # Errors
///
/// Returns `InvalidArgument` for blank names or names with control characters.
pub fn validate_application_name(name: &str) -> Result<()> {
    validate_name("application", name)
}

/// Validate a configuration name (or `LIKE` pattern).
///
/// # Errors
///
/// Returns `InvalidArgument` for blank names or names with control characters.
pub fn validate_configuration_name(name: &str) -> Result<()> {
    validate_name("configuration", name)
}

fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{kind} name must not be empty")));
    }
    if name.chars().any(char::is_control) {
        return Err(Error::InvalidArgument(format!(
            "{kind} name must not contain control characters: {name:?}"
        )));
    }
    Ok(())
}

/// Edit distance (insertions, deletions, substitutions) between two keys.
pub fn levenshtein_distance(from: &str, to: &str) -> usize {
    let target: Vec<char> = to.chars().collect();
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, source_char) in from.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &target_char) in target.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if source_char == target_char {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }

    row[target.len()]
}

/// Find existing keys similar to the searched key.
///
/// Returns up to `max` suggestions with edit distance ≤ 3,
/// sorted by distance then alphabetically.
pub fn find_similar_keys<'a, I>(searched: &str, existing: I, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut candidates: Vec<(usize, &str)> = existing
        .into_iter()
        .map(|key| (levenshtein_distance(searched, key), key.as_str()))
        .filter(|(dist, _)| *dist <= 3)
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    candidates
        .into_iter()
        .take(max)
        .map(|(_, key)| key.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_names() {
        assert!(validate_application_name("").is_err());
        assert!(validate_application_name("   ").is_err());
        assert!(validate_configuration_name("\t").is_err());
    }

    #[test]
    fn test_validate_rejects_control_characters() {
        let err = validate_configuration_name("time\nout").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_validate_accepts_patterns_and_dots() {
        assert!(validate_application_name("billing-service").is_ok());
        assert!(validate_configuration_name("db.pool.size").is_ok());
        assert!(validate_configuration_name("http_%").is_ok());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
        assert_eq!(levenshtein_distance("délai", "delai"), 1);
    }

    #[test]
    fn test_find_similar_keys() {
        let keys = vec![
            "timeout".to_string(),
            "timeouts".to_string(),
            "retries".to_string(),
        ];
        let result = find_similar_keys("timout", &keys, 3);
        assert_eq!(result, vec!["timeout".to_string(), "timeouts".to_string()]);
    }

    #[test]
    fn test_find_similar_keys_respects_max() {
        let keys = vec!["a1".to_string(), "a2".to_string(), "a3".to_string()];
        assert_eq!(find_similar_keys("a0", &keys, 2).len(), 2);
    }
}
