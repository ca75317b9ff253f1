use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A tabular record set as delivered by an ingestion collaborator:
/// header names plus rows of text cells, positionally aligned.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }
}

/// Which ledger a record set came from. Errors and faults carry this so the
/// operator knows which file to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Vendor,
    Internal,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Vendor => "vendor",
            Side::Internal => "internal",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row reduced to its canonical identity and amount in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub canonical_key: String,
    pub amount_minor: i64,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Matched,
    AmountMismatch,
    MissingInVendor,
    MissingInBooks,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Matched => "matched",
            Status::AmountMismatch => "amount_mismatch",
            Status::MissingInVendor => "missing_in_vendor",
            Status::MissingInBooks => "missing_in_books",
        }
    }

    /// Human-facing label used in report sheets.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Matched => "Matched",
            Status::AmountMismatch => "Amount Mismatch",
            Status::MissingInVendor => "Missing in Vendor",
            Status::MissingInBooks => "Missing in Books",
        }
    }

    pub const ALL: [Status; 4] = [
        Status::Matched,
        Status::AmountMismatch,
        Status::MissingInVendor,
        Status::MissingInBooks,
    ];
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory typo-match candidate for a missing-side row. Never changes the
/// row's status; surfaced for human review only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionNote {
    pub candidate_key: String,
    /// Similarity in 0–100.
    pub score: u8,
}

/// One output row per canonical key present on either side.
#[derive(Debug, Clone, Serialize)]
pub struct ReconRow {
    pub canonical_key: String,
    pub vendor_minor: Option<i64>,
    pub internal_minor: Option<i64>,
    /// vendor − internal, missing side counted as 0.
    pub variance_minor: i64,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<SuggestionNote>,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Non-fatal data-quality findings collected during a run. The lossy
/// behaviors themselves are unchanged (bad amounts still default to zero,
/// empty keys are still excluded from the join) — faults make them visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowFault {
    /// Canonical key came out empty after normalization; row excluded.
    EmptyKey { side: Side, row: usize },
    /// Amount cell did not parse; treated as a zero-value transaction.
    AmountParse { side: Side, row: usize, value: String },
    /// Statement line did not match the extraction grammar; dropped.
    UnparsedLine { line: usize },
}

// ---------------------------------------------------------------------------
// Summary + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub total_rows: usize,
    pub matched: usize,
    pub amount_mismatches: usize,
    pub missing_in_vendor: usize,
    pub missing_in_books: usize,
    /// Rows carrying a suggestion (subset of the missing buckets).
    pub suggested: usize,
    /// Everything that is not `Matched`.
    pub exceptions: usize,
    pub net_variance_minor: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub rows: Vec<ReconRow>,
    pub faults: Vec<RowFault>,
}
