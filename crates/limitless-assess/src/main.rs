//! limitless-assess CLI
//!
//! Assesses SQL scripts for compatibility with the Limitless restricted mode.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;
use walkdir::WalkDir;

use limitless_assess::prelude::*;

/// Compatibility assessment of SQL/DDL scripts for Limitless databases.
#[derive(Parser, Debug)]
#[command(name = "limitless-assess")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL files or directories to assess. Directories are searched for
    /// `.sql` files.
    #[arg(required_unless_present = "list_rules")]
    inputs: Vec<PathBuf>,

    /// Rule catalog definition (built-in catalog if not specified).
    #[arg(short, long, env = "LIMITLESS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Engine version to assess against (catalog default if not specified).
    #[arg(short = 'e', long, env = "LIMITLESS_ENGINE_VERSION")]
    engine_version: Option<String>,

    /// SQL dialect of the inputs.
    #[arg(short, long, default_value = "postgres")]
    dialect: DialectKind,

    /// Number of worker threads (available parallelism if not specified).
    #[arg(short, long)]
    workers: Option<usize>,

    /// Run deadline in seconds. Units not started in time are reported as
    /// TIMEOUT.
    #[arg(short, long)]
    timeout_secs: Option<u64>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write the report to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the catalog rules and exit.
    #[arg(long)]
    list_rules: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = load_catalog(cli)?;

    if cli.list_rules {
        let listing = list_rules(&catalog);
        emit(cli.output.as_deref(), &listing)?;
        return Ok(0);
    }

    let units = collect_units(&cli.inputs)?;
    debug!(units = units.len(), "collected input units");

    let mut options = AssessmentOptions {
        dialect: cli.dialect,
        timeout: cli.timeout_secs.map(Duration::from_secs),
        ..AssessmentOptions::default()
    };
    if let Some(workers) = cli.workers {
        options.workers = workers;
    }

    let report = Assessor::new(&catalog, options).run(&units)?;
    let rendered = match cli.format {
        Format::Json => serde_json::to_string_pretty(&report)?,
        Format::Text => report.to_string(),
    };
    emit(cli.output.as_deref(), &rendered)?;

    Ok(exit_code(report.status()))
}

fn load_catalog(cli: &Cli) -> anyhow::Result<Catalog> {
    let version = cli.engine_version.as_deref();
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_path(path, version)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::builtin_version(version).context("failed to load built-in catalog")?,
    };
    debug!(version = catalog.version(), rules = catalog.len(), "catalog ready");
    Ok(catalog)
}

/// Expands directories into their `.sql` files, sorted by path. Files given
/// explicitly are kept whatever their extension.
fn collect_units(inputs: &[PathBuf]) -> anyhow::Result<Vec<SourceUnit>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(input).follow_links(true) {
                let entry = entry.with_context(|| format!("failed to scan {}", input.display()))?;
                if entry.file_type().is_file() && is_sql_file(entry.path()) {
                    found.push(entry.into_path());
                }
            }
            found.sort();
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }

    paths
        .iter()
        .map(|path| {
            SourceUnit::from_path(path).with_context(|| format!("failed to read {}", path.display()))
        })
        .collect()
}

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
}

fn list_rules(catalog: &Catalog) -> String {
    let mut out = format!("engine version {}\n", catalog.version());
    for rule in catalog.all_rules() {
        out.push_str(&format!(
            "{:<8} {:<36} {:<20} {}\n",
            rule.severity.as_str(),
            rule.id,
            rule.target.to_string(),
            rule.message
        ));
    }
    out
}

fn emit(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, format!("{text}\n"))
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn exit_code(status: Status) -> u8 {
    match status {
        Status::Pass | Status::FailWithWarnings => 0,
        Status::Fail => 2,
    }
}
