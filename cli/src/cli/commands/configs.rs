//! Configuration command implementations.

use super::open_repository;
use crate::cli::ConfigFormat;
use crate::error::{Error, Result};
use crate::model::{ConfigEntry, MatchMode};
use crate::validate::{find_similar_keys, validate_application_name, validate_configuration_name};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Output for upsert-config.
#[derive(Serialize)]
struct UpsertOutput<'a> {
    application: &'a str,
    configuration: &'a str,
    value: &'a str,
    saved: bool,
}

/// Output for delete-config.
#[derive(Serialize)]
struct DeleteOutput<'a> {
    application: &'a str,
    configuration: &'a str,
    mode: MatchMode,
    deleted: usize,
}

/// Display every configuration value of an application.
///
/// `--json` forces the JSON format regardless of `--format`.
///
/// # Errors
///
/// Returns an error if the database cannot be read or output fails.
pub fn list(
    application: &str,
    format: ConfigFormat,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let repo = open_repository(db_path)?;
    let configs = repo.get_all_configs(application)?;
    repo.close()?;

    let format = if json { ConfigFormat::Json } else { format };
    print!("{}", render_configs(&configs, format)?);
    Ok(())
}

/// Render a configuration map in the requested format.
///
/// JSON is indented with four spaces; text is one `key value` line per entry.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn render_configs(configs: &BTreeMap<String, String>, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Json => {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            configs.serialize(&mut ser)?;
            let mut out = String::from_utf8_lossy(&buf).into_owned();
            out.push('\n');
            Ok(out)
        }
        ConfigFormat::Text => Ok(configs
            .iter()
            .map(|(key, value)| format!("{key} {value}\n"))
            .collect()),
    }
}

/// Display a single configuration value.
///
/// On a miss, keys of the same application within a small edit distance are
/// offered as suggestions.
///
/// # Errors
///
/// Returns `ConfigNotFound` (or `ConfigNotFoundSimilar`) when the key is absent.
pub fn get(
    application: &str,
    configuration: &str,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let repo = open_repository(db_path)?;
    let value = match repo.get_config(application, configuration) {
        Ok(value) => value,
        Err(Error::ConfigNotFound {
            application,
            configuration,
        }) => {
            let known = repo.get_all_configs(&application)?;
            let similar = find_similar_keys(&configuration, known.keys(), 3);
            return Err(if similar.is_empty() {
                Error::ConfigNotFound {
                    application,
                    configuration,
                }
            } else {
                Error::ConfigNotFoundSimilar {
                    application,
                    configuration,
                    similar,
                }
            });
        }
        Err(e) => return Err(e),
    };
    repo.close()?;

    if json {
        let entry = ConfigEntry::new(application, configuration, value);
        println!("{}", serde_json::to_string(&entry)?);
    } else {
        println!("{value}");
    }

    Ok(())
}

/// Insert or replace a configuration value.
///
/// # Errors
///
/// Returns `InvalidArgument` for blank names or a database error.
pub fn upsert(
    application: &str,
    configuration: &str,
    value: &str,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let mut repo = open_repository(db_path)?;
    repo.upsert_config(application, configuration, value)?;
    repo.close()?;

    if json {
        let output = UpsertOutput {
            application,
            configuration,
            value,
            saved: true,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "{} {} = {}",
            "Saved".green(),
            format!("{application}.{configuration}").as_str().bold(),
            value
        );
    }

    Ok(())
}

/// Delete one configuration value, or every value matching a `LIKE` pattern.
///
/// # Errors
///
/// Returns `NoRowsAffected` when nothing matched, or a database error.
pub fn delete(
    application: &str,
    configuration: &str,
    mode: MatchMode,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    validate_application_name(application)?;
    validate_configuration_name(configuration)?;

    let repo = open_repository(db_path)?;
    let deleted = repo.delete_config(application, configuration, mode)?;
    repo.close()?;

    if json {
        let output = DeleteOutput {
            application,
            configuration,
            mode,
            deleted,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let noun = if deleted == 1 { "value" } else { "values" };
        println!(
            "{} {deleted} configuration {noun} from {}",
            "Deleted".red(),
            application.bold()
        );
    }

    Ok(())
}
