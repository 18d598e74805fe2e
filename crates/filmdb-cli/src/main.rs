//! filmdb CLI - Main entry point

use clap::Parser;
use filmdb_cli::commands::{list, load};
use filmdb_cli::{Cli, Commands};
use filmdb_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use filmdb_ingest::{CapacityHints, SourceSet};
use std::process;
use tracing::error;

fn main() {
    // Values from .env become defaults for the env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Verbose mode logs debug to stderr; otherwise only warnings and errors
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("filmdb-cli")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> filmdb_cli::Result<()> {
    let mut config = cli.scan.ingest_config()?;

    match &cli.command {
        Commands::Load {
            movies,
            actors,
            actresses,
            target,
            shell,
            json,
            preallocate,
        } => {
            if *preallocate {
                config.capacity = CapacityHints::full_dump();
            }
            let mut sources = SourceSet::new(movies);
            if let Some(path) = actors {
                sources = sources.with_actors(path);
            }
            if let Some(path) = actresses {
                sources = sources.with_actresses(path);
            }

            load::run(&load::LoadOptions {
                sources,
                config,
                target: target.clone(),
                json: *json,
                shell: *shell,
            })
        },

        Commands::ListActors { files } => list::actors(files, &config),

        Commands::ListRoles { files } => list::roles(files, &config),

        Commands::ListMovies { files } => list::movies(files, &config),
    }
}
