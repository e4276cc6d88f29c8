//! configlite CLI entry point.

use clap::Parser;
use configlite::cli::commands;
use configlite::cli::{Cli, Commands};
use configlite::error::Error;
use configlite::model::MatchMode;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if let Some(hint) = e.hint() {
                eprintln!("Error: {e}\n  Hint: {hint}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let db = cli.db.as_ref();
    let json = cli.json;

    match &cli.command {
        Commands::ListApp => commands::apps::list(db, json),
        Commands::RegisterApp {
            application,
            strict,
        } => commands::apps::register(application, *strict, db, json),

        Commands::ListConfigs {
            format,
            application,
        } => commands::configs::list(application, *format, db, json),
        Commands::GetConfig {
            application,
            configuration,
        } => commands::configs::get(application, configuration, db, json),
        Commands::UpsertConfig {
            application,
            configuration,
            value,
        } => commands::configs::upsert(application, configuration, value, db, json),
        Commands::DeleteConfig {
            like,
            application,
            configuration,
        } => commands::configs::delete(
            application,
            configuration,
            MatchMode::from_like_flag(*like),
            db,
            json,
        ),

        Commands::Version => commands::version::execute(json),
        Commands::Completions { shell } => {
            commands::completions::execute(*shell, &mut std::io::stdout())
        }
    }
}
