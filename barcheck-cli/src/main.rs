//! barcheck CLI — validate a Parquet market-data file or a directory of them.
//!
//! Exit status is 0 when every discovered file passes, 1 otherwise (including
//! when the path does not exist, is not a file or directory, or no files are
//! found).

use anyhow::{Context, Result};
use barcheck_runner::{
    export_csv, export_json, render_text, BatchError, BatchRunner, ValidationConfig,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "barcheck",
    about = "Validate Parquet minute-bar and tick files before downstream use",
    version
)]
struct Cli {
    /// A Parquet file or a directory of Parquet files.
    path: PathBuf,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// File extension to match in directories (overrides config).
    #[arg(long)]
    extension: Option<String>,

    /// Validate files in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Fail files that are missing expected columns.
    #[arg(long, default_value_t = false)]
    strict_columns: bool,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("✗ {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the whole run succeeded.
fn run(cli: Cli) -> Result<bool> {
    let config = load_config(&cli)?;
    tracing::debug!(?config, "resolved configuration");
    let runner = BatchRunner::from_config(&config);

    let batch = match runner.run(&cli.path) {
        Ok(batch) => batch,
        Err(e @ (BatchError::PathNotFound(_) | BatchError::InvalidPath(_))) => {
            eprintln!("✗ {e}");
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    let report = match cli.format {
        Format::Text => render_text(&batch),
        Format::Json => export_json(&batch)?,
        Format::Csv => export_csv(&batch)?,
    };
    print!("{report}");
    if cli.format == Format::Json {
        println!();
    }

    Ok(batch.overall)
}

fn load_config(cli: &Cli) -> Result<ValidationConfig> {
    let mut config = match &cli.config {
        Some(path) => ValidationConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ValidationConfig::default(),
    };

    if let Some(ext) = &cli.extension {
        config.extension = ext.clone();
    }
    config.parallel |= cli.parallel;
    config.strict_columns |= cli.strict_columns;
    config.normalize()?;
    Ok(config)
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("barcheck=warn,barcheck_core=warn,barcheck_runner=warn"),
        1 => EnvFilter::new("barcheck=info,barcheck_core=info,barcheck_runner=info"),
        _ => EnvFilter::new("barcheck=debug,barcheck_core=debug,barcheck_runner=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
