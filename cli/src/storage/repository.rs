//! SQLite repository for applications and their configuration values.
//!
//! Every operation is one SQL round trip (or one IMMEDIATE transaction for
//! writes touching both tables). SQLite errors are wrapped with the
//! application/configuration they concerned and returned unchanged; there
//! is no retry or local recovery.

use crate::error::{Error, Result};
use crate::model::MatchMode;
use crate::storage::migrations::run_migrations;
use crate::validate::{validate_application_name, validate_configuration_name};
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Lock wait applied when no explicit timeout is requested.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle on one configuration database file.
///
/// The connection is owned exclusively; [`Repository::close`] consumes the
/// handle so it cannot be used afterwards.
#[derive(Debug)]
pub struct Repository {
    conn: Connection,
    path: PathBuf,
}

impl Repository {
    /// Open (or create) the database at `path` and apply pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `Open` if the file cannot be opened or configured and
    /// `Migration` if the schema cannot be brought up to date.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open a database with an optional busy timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Same as [`Repository::open`].
    pub fn open_with_timeout(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        let open_err = |source| Error::Open {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open(path).map_err(open_err)?;
        let timeout = timeout_ms.map_or(DEFAULT_BUSY_TIMEOUT, Duration::from_millis);
        conn.busy_timeout(timeout).map_err(open_err)?;
        // journal_mode answers with the mode actually in effect
        let journal_mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(open_err)?;
        debug!(path = %path.display(), journal_mode = %journal_mode, "Opened database");
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(open_err)?;

        Self::migrate(conn, path.to_path_buf())
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        Self::migrate(conn, path)
    }

    fn migrate(mut conn: Connection, path: PathBuf) -> Result<Self> {
        match run_migrations(&mut conn) {
            Ok(applied) => {
                debug!(path = %path.display(), applied, "Database ready");
                Ok(Self { conn, path })
            }
            Err(source) => Err(Error::Migration { path, source }),
        }
    }

    /// Path the repository was opened from (`:memory:` for in-memory).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the underlying connection (for read operations).
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Close the database, releasing the file handle.
    ///
    /// # Errors
    ///
    /// Returns `Query` if SQLite refuses to close the connection.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, source)| Error::Query {
            context: format!("cannot close configuration database: {}", path.display()),
            source,
        })
    }

    /// Run `f` inside an IMMEDIATE transaction, committing on success.
    ///
    /// The write lock is taken up front so two processes upserting at the same
    /// time serialize on SQLite's lock instead of failing at commit.
    fn mutate<F, R>(&mut self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        debug!(op, "Begin transaction");
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)
            .map_err(Error::query(format!("cannot begin transaction for {op}")))?;

        let result = f(&tx)?;

        tx.commit()
            .map_err(Error::query(format!("cannot commit transaction for {op}")))?;
        Ok(result)
    }

    // ======================
    // Application Operations
    // ======================

    /// List all registered application names, in database order.
    ///
    /// # Errors
    ///
    /// Returns `Query` if the table cannot be read.
    pub fn list_applications(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM applications")
            .map_err(Error::query("cannot query the database"))?;

        let apps = stmt
            .query_map([], |row| row.get(0))
            .map_err(Error::query("cannot browse application table"))?
            .collect::<rusqlite::Result<Vec<String>>>()
            .map_err(Error::query("cannot scan application table row"))?;

        Ok(apps)
    }

    /// Register an application, doing nothing if it already exists.
    ///
    /// Returns `true` when a new row was inserted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank name, `Query` if the insert fails.
    pub fn register_application(&self, name: &str) -> Result<bool> {
        validate_application_name(name)?;
        let inserted = insert_application(&self.conn, name)?;
        debug!(application = name, inserted, "Registered application");
        Ok(inserted)
    }

    /// Register an application, failing if the name is already taken.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationExists` on duplicate, `Query` on other failures.
    pub fn must_register_application(&self, name: &str) -> Result<()> {
        validate_application_name(name)?;
        match self
            .conn
            .execute("INSERT INTO applications (name) VALUES (?1)", [name])
        {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::ApplicationExists {
                    name: name.to_string(),
                })
            }
            Err(source) => Err(Error::Query {
                context: format!("cannot register application: {name}"),
                source,
            }),
        }
    }

    // ========================
    // Configuration Operations
    // ========================

    /// Get every configuration value of an application.
    ///
    /// Unknown applications yield an empty map.
    ///
    /// # Errors
    ///
    /// Returns `Query` if the rows cannot be read.
    pub fn get_all_configs(&self, application: &str) -> Result<BTreeMap<String, String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT configuration_name, configuration_value
                 FROM configurations
                 WHERE application_name = ?1",
            )
            .map_err(Error::query(format!(
                "cannot get configurations from database: {application}"
            )))?;

        let configs = stmt
            .query_map([application], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(Error::query(format!(
                "cannot iterate over all configurations: {application}"
            )))?
            .collect::<rusqlite::Result<BTreeMap<_, _>>>()
            .map_err(Error::query(format!(
                "cannot scan single config: {application}"
            )))?;

        Ok(configs)
    }

    /// Get a single configuration value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` when the pair has no row, `Query` on failure.
    pub fn get_config(&self, application: &str, name: &str) -> Result<String> {
        self.conn
            .query_row(
                "SELECT configuration_value
                 FROM configurations
                 WHERE application_name = ?1
                   AND configuration_name = ?2",
                [application, name],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::query(format!(
                "cannot get configuration from database: ({application}, {name})"
            )))?
            .ok_or_else(|| Error::ConfigNotFound {
                application: application.to_string(),
                configuration: name.to_string(),
            })
    }

    /// Insert or replace a configuration value.
    ///
    /// The application is registered in the same transaction. The value is
    /// written by a single `INSERT … ON CONFLICT DO UPDATE`, never by a read
    /// followed by a write.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for blank names, `Query` if the write fails.
    pub fn upsert_config(&mut self, application: &str, name: &str, value: &str) -> Result<()> {
        validate_application_name(application)?;
        validate_configuration_name(name)?;

        self.mutate("upsert_config", |tx| {
            insert_application(tx, application)?;
            tx.execute(
                "INSERT INTO configurations (application_name, configuration_name, configuration_value)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (application_name, configuration_name) DO
                 UPDATE SET configuration_value = excluded.configuration_value",
                rusqlite::params![application, name, value],
            )
            .map_err(Error::query(format!(
                "cannot upsert configuration: ({application}, {name})"
            )))?;
            Ok(())
        })?;

        debug!(application, configuration = name, "Upserted configuration");
        Ok(())
    }

    /// Delete configuration values of an application.
    ///
    /// With [`MatchMode::Like`] the name is used as a `LIKE` pattern. Returns
    /// the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `NoRowsAffected` when nothing matched, `Query` on failure.
    pub fn delete_config(&self, application: &str, name: &str, mode: MatchMode) -> Result<usize> {
        let sql = match mode {
            MatchMode::Exact => {
                "DELETE FROM configurations
                 WHERE application_name = ?1
                   AND configuration_name = ?2"
            }
            MatchMode::Like => {
                "DELETE FROM configurations
                 WHERE application_name = ?1
                   AND configuration_name LIKE ?2"
            }
        };

        let deleted = self
            .conn
            .execute(sql, [application, name])
            .map_err(Error::query(format!(
                "cannot delete a specific config: ({application}, {name})"
            )))?;

        if deleted == 0 {
            return Err(Error::NoRowsAffected {
                application: application.to_string(),
                configuration: name.to_string(),
            });
        }

        debug!(
            application,
            configuration = name,
            mode = mode.as_str(),
            deleted,
            "Deleted configuration"
        );
        Ok(deleted)
    }
}

/// Idempotent application insert shared by registration and upsert.
fn insert_application(conn: &Connection, name: &str) -> Result<bool> {
    let rows = conn
        .execute(
            "INSERT INTO applications (name) VALUES (?1) ON CONFLICT DO NOTHING",
            [name],
        )
        .map_err(Error::query(format!("cannot register application: {name}")))?;
    Ok(rows > 0)
}
