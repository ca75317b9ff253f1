//! Carrier freight v1 statement parser.
//!
//! Parses invoice lines from `pdftotext -layout` output of a carrier freight
//! statement. Each billable line carries a composite invoice number, a charge
//! type, date fields, a currency code, and two amounts (original and balance):
//!
//! ```text
//! MSC-004-0012345   FRT   05 JAN 26   19 JAN 26   USD     1,250.00     1,250.00
//! ```
//!
//! The balance (last amount) is the face value. Header, footer, and
//! continuation lines do not match the grammar and are dropped; the drop
//! count is surfaced so the caller can report it.

use regex::Regex;

use bookmatch_recon::normalize::normalize_amount;

use crate::CliError;

/// Parsed statement: extracted rows plus the 1-based numbers of dropped
/// lines.
#[derive(Debug)]
pub(super) struct ParsedStatement {
    pub rows: Vec<InvoiceRow>,
    pub dropped_lines: Vec<usize>,
}

/// One billable line reduced to its reconciliation pair.
#[derive(Debug)]
pub(super) struct InvoiceRow {
    pub invoice_number: String,
    /// Face value in cents.
    pub amount_minor: i64,
}

/// Parse pdftotext output using the carrier_freight_v1 template.
pub(super) fn parse(text: &str) -> Result<ParsedStatement, CliError> {
    if text.trim().is_empty() {
        return Err(CliError::parse(
            "PDF appears scanned/image-only — text extraction failed",
        ));
    }

    // <carrier>-<branch>-<sequence> <charge-type> <dates...> <currency> <amount> <amount>
    let line_re = Regex::new(
        r"(?x)
        ^\s*
        ([A-Z0-9]{2,4}-\d{2,4}-\d{3,10})      # composite invoice number
        \s+([A-Z]{2,5})                        # charge type code
        \s+.*?                                 # date fields (layout varies)
        \s([A-Z]{3})                           # ISO currency code
        \s+(\(?-?[\d,]+\.\d{2}\)?)             # original amount
        \s+(\(?-?[\d,]+\.\d{2}\)?)             # balance (face value)
        \s*$",
    )
    .unwrap();

    let mut rows = Vec::new();
    let mut dropped_lines = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let Some(caps) = line_re.captures(line) else {
            dropped_lines.push(line_no);
            continue;
        };

        let invoice_number = caps.get(1).unwrap().as_str().to_string();
        let balance = caps.get(5).unwrap().as_str();

        match normalize_amount(balance) {
            Some(amount_minor) => rows.push(InvoiceRow { invoice_number, amount_minor }),
            None => dropped_lines.push(line_no),
        }
    }

    if rows.is_empty() {
        return Err(CliError::parse(
            "Unsupported or unrecognized statement template",
        ));
    }

    Ok(ParsedStatement { rows, dropped_lines })
}
