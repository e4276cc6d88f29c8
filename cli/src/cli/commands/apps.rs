//! Application command implementations.

use super::open_repository;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Output for register-app.
#[derive(Serialize)]
struct RegisterOutput<'a> {
    application: &'a str,
    registered: bool,
}

/// List registered applications, one per line.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or read.
pub fn list(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let repo = open_repository(db_path)?;
    let apps = repo.list_applications()?;
    repo.close()?;

    if json {
        println!("{}", serde_json::to_string(&apps)?);
    } else {
        for app in &apps {
            println!("{app}");
        }
    }

    Ok(())
}

/// Register an application.
///
/// With `strict`, an existing application is an error instead of a no-op.
///
/// # Errors
///
/// Returns `ApplicationExists` in strict mode on duplicates, or a database error.
pub fn register(
    application: &str,
    strict: bool,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let repo = open_repository(db_path)?;
    let registered = if strict {
        repo.must_register_application(application)?;
        true
    } else {
        repo.register_application(application)?
    };
    repo.close()?;

    if json {
        let output = RegisterOutput {
            application,
            registered,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if registered {
        println!("{} {}", "Registered application:".green(), application.bold());
    } else {
        println!("Application already registered: {}", application.bold());
    }

    Ok(())
}
