//! Read-only projections over classified rows: per-status buckets, aggregate
//! counters, and the named sheet tables handed to export/display
//! collaborators. Nothing here mutates a `ReconRow`.

use crate::model::{ReconReport, ReconRow, ReconSummary, Status};

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub fn summarize(rows: &[ReconRow]) -> ReconSummary {
    let mut matched = 0;
    let mut amount_mismatches = 0;
    let mut missing_in_vendor = 0;
    let mut missing_in_books = 0;
    let mut suggested = 0;
    let mut net_variance_minor = 0;

    for row in rows {
        match row.status {
            Status::Matched => matched += 1,
            Status::AmountMismatch => amount_mismatches += 1,
            Status::MissingInVendor => missing_in_vendor += 1,
            Status::MissingInBooks => missing_in_books += 1,
        }
        if row.suggestion.is_some() {
            suggested += 1;
        }
        net_variance_minor += row.variance_minor;
    }

    ReconSummary {
        total_rows: rows.len(),
        matched,
        amount_mismatches,
        missing_in_vendor,
        missing_in_books,
        suggested,
        exceptions: amount_mismatches + missing_in_vendor + missing_in_books,
        net_variance_minor,
    }
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Rows grouped by status, in the fixed `Status::ALL` order.
pub fn partition(rows: &[ReconRow]) -> Vec<(Status, Vec<&ReconRow>)> {
    Status::ALL
        .iter()
        .map(|status| {
            let bucket: Vec<&ReconRow> = rows.iter().filter(|r| r.status == *status).collect();
            (*status, bucket)
        })
        .collect()
}

/// The reviewable subset: rows carrying a suggestion.
pub fn suggested(rows: &[ReconRow]) -> Vec<&ReconRow> {
    rows.iter().filter(|r| r.suggestion.is_some()).collect()
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

pub const SHEET_COLUMNS: [&str; 6] = [
    "Invoice",
    "As-per-Vendor",
    "As-per-Books",
    "Variance",
    "Status",
    "Suggestion",
];

/// One named table of the report, shaped for a spreadsheet sheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<[String; 6]>,
}

/// Minor units → "1234.50". Exact string arithmetic, no floats.
pub fn format_minor(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

fn sheet_row(row: &ReconRow) -> [String; 6] {
    [
        row.canonical_key.clone(),
        row.vendor_minor.map(format_minor).unwrap_or_default(),
        row.internal_minor.map(format_minor).unwrap_or_default(),
        format_minor(row.variance_minor),
        row.status.label().to_string(),
        row.suggestion
            .as_ref()
            .map(|s| format!("{} ({}%)", s.candidate_key, s.score))
            .unwrap_or_default(),
    ]
}

fn sheet_name(status: Status) -> &'static str {
    match status {
        Status::Matched => "Matched",
        Status::AmountMismatch => "Amount_Mismatch",
        Status::MissingInVendor => "Missing_in_Vendor",
        Status::MissingInBooks => "Missing_in_Books",
    }
}

/// Project a report into its export tables: `Full_Recon` with every row,
/// one sheet per non-empty status bucket, then `Suggested` when any row
/// carries a note.
pub fn sheets(report: &ReconReport) -> Vec<Sheet> {
    let mut out = Vec::new();

    out.push(Sheet {
        name: "Full_Recon".into(),
        rows: report.rows.iter().map(sheet_row).collect(),
    });

    for (status, bucket) in partition(&report.rows) {
        if bucket.is_empty() {
            continue;
        }
        out.push(Sheet {
            name: sheet_name(status).into(),
            rows: bucket.into_iter().map(sheet_row).collect(),
        });
    }

    let reviewable = suggested(&report.rows);
    if !reviewable.is_empty() {
        out.push(Sheet {
            name: "Suggested".into(),
            rows: reviewable.into_iter().map(sheet_row).collect(),
        });
    }

    out
}
