//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Output format for `list-configs`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Indented JSON object (default)
    #[default]
    Json,
    /// One `key value` pair per line
    Text,
}

/// configlite - shared application configuration stored in SQLite
#[derive(Parser, Debug)]
#[command(name = "configlite", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration database file to use (default: ~/.config.db)
    #[arg(long, global = true, env = "CONFIGLITE_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON (results on stdout, errors on stderr)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered applications
    #[command(visible_alias = "la")]
    ListApp,

    /// Register an application
    #[command(visible_alias = "ra")]
    RegisterApp {
        /// Application name
        application: String,

        /// Fail if the application is already registered
        #[arg(long)]
        strict: bool,
    },

    /// Display every configuration value of an application
    #[command(visible_alias = "lc")]
    ListConfigs {
        /// The format to display the configuration in
        #[arg(short, long, value_enum, default_value_t)]
        format: ConfigFormat,

        /// The application whose configuration has to be displayed
        application: String,
    },

    /// Display a single configuration value
    #[command(visible_alias = "gc")]
    GetConfig {
        /// Application name
        application: String,

        /// Configuration name
        configuration: String,
    },

    /// Insert or replace a configuration value
    #[command(visible_alias = "uc")]
    UpsertConfig {
        /// Application name
        application: String,

        /// Configuration name
        configuration: String,

        /// Value to store
        value: String,
    },

    /// Delete a configuration value
    #[command(visible_alias = "dc")]
    DeleteConfig {
        /// Use the configuration name in an SQL LIKE clause ('%' and '_' wildcards)
        #[arg(short, long)]
        like: bool,

        /// Application name
        application: String,

        /// Configuration name (or pattern with --like)
        configuration: String,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
