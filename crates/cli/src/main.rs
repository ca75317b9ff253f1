// BookMatch CLI - reconcile a vendor statement against internal books

mod exit_codes;
mod parse;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{
    EXIT_INVALID_CONFIG, EXIT_IO_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "bkm")]
#[command(about = "Reconcile a vendor statement against internal books")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile two ledgers and report per-row status
    #[command(after_help = "\
Examples:
  bkm run --vendor statement.xlsx --internal books.csv
  bkm run --vendor statement.csv --internal books.csv --config recon.toml
  bkm run --vendor a.csv --internal b.csv --json
  bkm run --vendor a.csv --internal b.csv --export report.xlsx")]
    Run {
        /// Vendor statement (.csv, .tsv, or .xlsx)
        #[arg(long)]
        vendor: PathBuf,

        /// Internal books export (.csv, .tsv, or .xlsx)
        #[arg(long)]
        internal: PathBuf,

        /// TOML config file (keywords, sign conventions, thresholds)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Statement template for a PDF vendor file
        #[arg(long, default_value = "carrier_freight_v1")]
        pdf_template: String,

        /// Output the JSON report to stdout instead of the human summary
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write a multi-sheet XLSX report
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  bkm validate recon.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },

    /// Transform artifacts into tabular CSV
    #[command(subcommand)]
    Parse(parse::ParseCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { vendor, internal, config, pdf_template, json, output, export } => {
            run::cmd_run(vendor, internal, config, &pdf_template, json, output, export)
        }
        Commands::Validate { config } => cmd_validate(config),
        Commands::Parse(command) => parse::cmd_parse(command),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| CliError::io(format!("cannot read config: {e}")))?;

    match bookmatch_recon::ReconConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}' (tolerance {} minor units, suggestion threshold {})",
                config.name, config.tolerance.amount_minor, config.suggestion.threshold,
            );
            Ok(())
        }
        Err(e) => Err(CliError {
            code: EXIT_INVALID_CONFIG,
            message: e.to_string(),
            hint: None,
        }),
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO_ERROR, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE_ERROR, message: msg.into(), hint: None }
    }
}
