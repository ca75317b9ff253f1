//! `bkm parse statement-pdf` — extract invoice/amount CSV from carrier
//! statement PDFs.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use bookmatch_recon::model::RawTable;

use crate::exit_codes::EXIT_IO_ERROR;
use crate::CliError;

use super::carrier_freight_v1;

const AVAILABLE_TEMPLATES: &[&str] = &["carrier_freight_v1"];

/// Validate the template, extract text, and run the template parser.
/// Returns the extracted text alongside the parse so callers can report
/// progress.
fn parse_statement(
    template: &str,
    file: &Path,
) -> Result<(String, carrier_freight_v1::ParsedStatement), CliError> {
    if !AVAILABLE_TEMPLATES.contains(&template) {
        return Err(CliError::args(format!(
            "Unknown template: {} (available: {})",
            template,
            AVAILABLE_TEMPLATES.join(", "),
        )));
    }

    let text = run_pdftotext(file)?;

    let parsed = match template {
        "carrier_freight_v1" => carrier_freight_v1::parse(&text)?,
        _ => unreachable!(),
    };

    Ok((text, parsed))
}

/// Parse a statement PDF straight into an ingestion table, for `bkm run`
/// with a PDF vendor side. Returns the table plus the 1-based numbers of
/// dropped lines.
pub(crate) fn read_statement_table(
    template: &str,
    file: &Path,
) -> Result<(RawTable, Vec<usize>), CliError> {
    let (_, parsed) = parse_statement(template, file)?;

    let mut table = RawTable::new(vec!["invoice_number".into(), "amount".into()]);
    for row in &parsed.rows {
        table.rows.push(vec![
            row.invoice_number.clone(),
            bookmatch_recon::bucket::format_minor(row.amount_minor),
        ]);
    }

    Ok((table, parsed.dropped_lines))
}

pub(super) fn cmd_parse_statement_pdf(
    template: &str,
    file: &Path,
    out: &Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let (text, parsed) = parse_statement(template, file)?;

    if !quiet {
        eprintln!("Extracted {} bytes of text from {}", text.len(), file.display());
        eprintln!("Parsed {} invoice rows", parsed.rows.len());
        if !parsed.dropped_lines.is_empty() {
            eprintln!(
                "warning: {} line(s) did not match the template and were dropped",
                parsed.dropped_lines.len(),
            );
        }
    }

    write_csv(&parsed.rows, out)?;

    Ok(())
}

fn write_csv(
    rows: &[carrier_freight_v1::InvoiceRow],
    out: &Option<PathBuf>,
) -> Result<(), CliError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer
            .write_record(["invoice_number", "amount"])
            .map_err(|e| CliError::io(e.to_string()))?;
        for row in rows {
            writer
                .write_record([
                    row.invoice_number.as_str(),
                    bookmatch_recon::bucket::format_minor(row.amount_minor).as_str(),
                ])
                .map_err(|e| CliError::io(e.to_string()))?;
        }
        writer.flush().map_err(|e| CliError::io(e.to_string()))?;
    }

    match out {
        Some(path) => {
            std::fs::write(path, &buf)
                .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
            eprintln!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            std::io::stdout()
                .write_all(&buf)
                .map_err(|e| CliError::io(e.to_string()))?;
        }
    }

    Ok(())
}

/// Run `pdftotext -layout <file> -` and capture stdout.
fn run_pdftotext(file: &Path) -> Result<String, CliError> {
    // Check that pdftotext exists
    which::which("pdftotext").map_err(|_| CliError {
        code: EXIT_IO_ERROR,
        message: "pdftotext not installed (poppler-utils)".to_string(),
        hint: Some("Install with: apt install poppler-utils / brew install poppler".to_string()),
    })?;

    let file_str = file
        .to_str()
        .ok_or_else(|| CliError::args(format!("invalid file path: {}", file.display())))?;

    let output = Command::new("pdftotext")
        .args(["-layout", file_str, "-"])
        .output()
        .map_err(|e| CliError::io(format!("failed to run pdftotext: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CliError::io(format!(
            "pdftotext failed (exit {}): {}",
            output.status.code().unwrap_or(-1),
            stderr.trim(),
        )));
    }

    let text = String::from_utf8_lossy(&output.stdout).to_string();

    if text.trim().is_empty() {
        return Err(CliError::parse(
            "PDF appears scanned/image-only — text extraction failed",
        ));
    }

    Ok(text)
}
