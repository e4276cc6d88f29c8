//! Version command implementation.

use crate::error::Result;
use crate::storage::migrations::latest_version;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    schema: &'a str,
    build: &'a str,
}

/// Execute the version command.
///
/// Reports the crate version and the newest schema migration the binary
/// knows how to apply.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let output = VersionOutput {
        version: env!("CARGO_PKG_VERSION"),
        schema: latest_version(),
        build: if cfg!(debug_assertions) { "dev" } else { "release" },
    };

    if json {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "configlite version {} (schema {}, {})",
            output.version, output.schema, output.build
        );
    }
    Ok(())
}
