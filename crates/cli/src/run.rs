//! `bkm run` — ingest both ledgers, run the engine, emit summary/report.

use std::path::{Path, PathBuf};

use bookmatch_recon::engine::{run, ReconInput};
use bookmatch_recon::error::ReconError;
use bookmatch_recon::model::{RawTable, ReconReport, RowFault};
use bookmatch_recon::ReconConfig;

use crate::exit_codes::{
    EXIT_EXCEPTIONS, EXIT_INVALID_CONFIG, EXIT_PARSE_ERROR, EXIT_SCHEMA_ERROR,
};
use crate::CliError;

pub fn cmd_run(
    vendor_path: PathBuf,
    internal_path: PathBuf,
    config_path: Option<PathBuf>,
    pdf_template: &str,
    json_output: bool,
    output_file: Option<PathBuf>,
    export_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;

    // A PDF vendor side goes through the statement template; its dropped
    // lines become run diagnostics.
    let (vendor, dropped_lines) = if extension(&vendor_path) == "pdf" {
        crate::parse::read_statement_table(pdf_template, &vendor_path)?
    } else {
        (ingest(&vendor_path)?, Vec::new())
    };
    let internal = ingest(&internal_path)?;

    let input = ReconInput { vendor, internal };
    let mut report = run(&config, &input).map_err(engine_error)?;
    report
        .faults
        .extend(dropped_lines.into_iter().map(|line| RowFault::UnparsedLine { line }));

    // Outputs
    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(ref path) = export_file {
        bookmatch_io::xlsx::write_report(&report, path)
            .map_err(|e| CliError::io(e.to_string()))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    print_summary(&report);

    if report.summary.exceptions > 0 {
        return Err(CliError {
            code: EXIT_EXCEPTIONS,
            message: String::new(), // summary already printed
            hint: None,
        });
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ReconConfig, CliError> {
    match path {
        None => Ok(ReconConfig::default()),
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("cannot read config: {e}")))?;
            ReconConfig::from_toml(&config_str).map_err(|e| CliError {
                code: EXIT_INVALID_CONFIG,
                message: e.to_string(),
                hint: None,
            })
        }
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Pick a reader by extension. Unknown extensions fall back to delimited
/// text, since exports frequently arrive as `.txt`.
fn ingest(path: &Path) -> Result<RawTable, CliError> {
    let result = match extension(path).as_str() {
        "xlsx" | "xls" | "xlsb" | "ods" => bookmatch_io::xlsx::read_table(path),
        _ => bookmatch_io::csv::read_table(path),
    };

    result.map_err(|e| CliError::parse(e.to_string()))
}

fn engine_error(err: ReconError) -> CliError {
    let code = match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::SchemaNotFound { .. } => EXIT_SCHEMA_ERROR,
        ReconError::EmptyTable { .. } => EXIT_PARSE_ERROR,
    };
    let hint = match err {
        ReconError::SchemaNotFound { .. } => {
            Some("rename the column or extend [schema] keywords in the config".to_string())
        }
        _ => None,
    };
    CliError { code, message: err.to_string(), hint }
}

/// Human summary on stderr; stdout stays reserved for --json.
fn print_summary(report: &ReconReport) {
    let s = &report.summary;
    eprintln!(
        "{}: {} rows — {} matched, {} amount mismatches, {} missing in vendor, {} missing in books, {} suggested — net variance {}",
        report.meta.config_name,
        s.total_rows,
        s.matched,
        s.amount_mismatches,
        s.missing_in_vendor,
        s.missing_in_books,
        s.suggested,
        bookmatch_recon::bucket::format_minor(s.net_variance_minor),
    );

    let empty_keys = count_faults(report, |f| matches!(f, RowFault::EmptyKey { .. }));
    let bad_amounts = count_faults(report, |f| matches!(f, RowFault::AmountParse { .. }));
    let dropped_lines = count_faults(report, |f| matches!(f, RowFault::UnparsedLine { .. }));

    if empty_keys > 0 {
        eprintln!("warning: {empty_keys} row(s) excluded — identifier empty after normalization");
    }
    if bad_amounts > 0 {
        eprintln!("warning: {bad_amounts} amount cell(s) unparseable, treated as 0.00");
    }
    if dropped_lines > 0 {
        eprintln!("warning: {dropped_lines} statement line(s) did not match the template");
    }
}

fn count_faults(report: &ReconReport, pred: impl Fn(&RowFault) -> bool) -> usize {
    report.faults.iter().filter(|f| pred(f)).count()
}
