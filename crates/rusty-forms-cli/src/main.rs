mod commands;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rusty_forms_engine::{Clock, FixedClock, SystemClock};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rusty-forms", about = "Validate form records against a declarative schema")]
struct Cli {
    /// Schema file (TOML), which must exist; without this flag the built-in signup schema is used
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Evaluate date bounds as of this day (yyyy-MM-dd) instead of today
    #[arg(long, global = true)]
    today: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a record and print the result as JSON
    Validate {
        /// JSON record file, or "-" for stdin
        input: String,
    },
    /// Validate a record and print it as JSON if it is valid
    Submit {
        /// JSON record file, or "-" for stdin
        input: String,
    },
    /// Print the sample signup record
    Defaults,
    /// Check a schema file for configuration errors
    CheckSchema {
        /// Schema file (TOML)
        path: PathBuf,
    },
}

fn clock(today: Option<&str>) -> Result<Box<dyn Clock>> {
    match today {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("Invalid --today date: {:?}", raw))?;
            Ok(Box::new(FixedClock(date)))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

fn run(cli: Cli) -> Result<bool> {
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Validate { input } => {
            let schema = commands::schema(cli.schema.as_deref())?;
            commands::validate(schema, clock(cli.today.as_deref())?, &input, &mut out)
        }
        Commands::Submit { input } => {
            let schema = commands::schema(cli.schema.as_deref())?;
            commands::submit(schema, clock(cli.today.as_deref())?, &input, &mut out)
        }
        Commands::Defaults => commands::defaults(&mut out),
        Commands::CheckSchema { path } => commands::check_schema(&path, &mut out),
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
