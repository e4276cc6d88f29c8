//! Database migrations embedded at compile time.
//!
//! Migrations are sourced from `/migrations/` at the repo root and
//! embedded into the binary using `include_str!`. This ensures the
//! binary is self-contained with no runtime file dependencies.

use rusqlite::{Connection, OptionalExtension, Result, TransactionBehavior};
use tracing::{debug, info};

/// A single migration with version identifier and SQL content.
struct Migration {
    version: &'static str,
    sql: &'static str,
}

/// All migrations in order, embedded at compile time.
///
/// Version names match the SQL filenames (without .sql extension).
/// The `schema_migrations` table tracks which have been applied.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "001_create_applications",
        sql: include_str!("../../../migrations/001_create_applications.sql"),
    },
    Migration {
        version: "002_create_configurations",
        sql: include_str!("../../../migrations/002_create_configurations.sql"),
    },
];

/// Version of the newest embedded migration.
#[must_use]
pub fn latest_version() -> &'static str {
    MIGRATIONS.last().map_or("", |m| m.version)
}

/// Run all pending migrations on the database.
///
/// Migrations are applied in order, each inside its own IMMEDIATE transaction
/// together with its `schema_migrations` row, so a failing step leaves no
/// partial schema behind. The history is re-checked under the write lock,
/// so processes opening the same new file concurrently apply each step once.
///
/// Returns the number of migrations applied by this call.
///
/// # Errors
///
/// Returns an error if the history table cannot be read or a migration fails.
pub fn run_migrations(conn: &mut Connection) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let applied: std::collections::HashSet<String> = conn
        .prepare("SELECT version FROM schema_migrations")?
        .query_map([], |row| row.get(0))?
        .collect::<Result<_, _>>()?;

    let mut count = 0;
    for migration in MIGRATIONS {
        if applied.contains(migration.version) {
            debug!(version = migration.version, "Migration already applied");
            continue;
        }

        // Another process may have applied it since the history was read.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let done = tx
            .query_row(
                "SELECT 1 FROM schema_migrations WHERE version = ?1",
                [migration.version],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if done {
            debug!(version = migration.version, "Migration applied concurrently");
            continue;
        }

        info!(version = migration.version, "Applying migration");
        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![migration.version, chrono::Utc::now().timestamp_millis()],
        )?;
        tx.commit()?;
        count += 1;

        info!(version = migration.version, "Migration complete");
    }

    Ok(count)
}
