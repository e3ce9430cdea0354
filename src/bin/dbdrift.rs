//! Command-line schema drift checker.

use clap::{Parser, Subcommand};
use dbdrift::builder::{SchemaBuilder, SnapshotSchemaBuilder};
use dbdrift::config::DriftConfig;
use dbdrift::diff::DiffEngine;
use dbdrift::{report, snapshot};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dbdrift")]
#[command(version)]
#[command(about = "Detect structural drift between relational schema snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a test snapshot against the reference snapshot
    Diff {
        /// Snapshot of the schema under test
        test: PathBuf,

        /// Reference snapshot; defaults to the configured path
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Exit with status 2 if any hard mismatch is found
        #[arg(long)]
        strict: bool,
    },
    /// Print a readable outline of a snapshot
    Show {
        /// Snapshot to display
        snapshot: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Diff {
            test,
            reference,
            strict,
        } => {
            let config = DriftConfig::load()?;
            let scope = config.catalog_schema();
            let reference_path =
                reference.unwrap_or_else(|| PathBuf::from(&config.reference_snapshot));

            let reference_db = SnapshotSchemaBuilder::new(reference_path).build(&scope)?;
            let test_db = SnapshotSchemaBuilder::new(test).build(&scope)?;

            let records = DiffEngine::new().compare(&reference_db, &test_db);
            print!("{}", report::render(&records));

            let summary = report::summarize(&records);
            if strict && summary.mismatches > 0 {
                return Ok(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show { snapshot: path } => {
            let database = snapshot::load(&path)?;
            print!("{}", report::describe_database(&database));
            Ok(ExitCode::SUCCESS)
        }
    }
}
