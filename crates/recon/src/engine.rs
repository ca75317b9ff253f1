use crate::bucket::summarize;
use crate::config::{ReconConfig, SignConvention};
use crate::error::ReconError;
use crate::matcher::join_records;
use crate::model::{
    NormalizedRecord, RawTable, ReconMeta, ReconReport, RowFault, Side,
};
use crate::normalize::{normalize_amount, normalize_identifier};
use crate::schema::resolve_columns;
use crate::suggest::attach_suggestions;

/// The two record sets of one run.
pub struct ReconInput {
    pub vendor: RawTable,
    pub internal: RawTable,
}

/// Run one reconciliation. Pure function of its inputs: no retained state,
/// no IO. Concurrent runs may share a `ReconConfig` as long as it is not
/// mutated mid-run.
pub fn run(config: &ReconConfig, input: &ReconInput) -> Result<ReconReport, ReconError> {
    let mut faults = Vec::new();

    let vendor = prepare_side(Side::Vendor, &input.vendor, config, &mut faults)?;
    let internal = prepare_side(Side::Internal, &input.internal, config, &mut faults)?;

    let mut rows = join_records(&vendor, &internal, config.tolerance.amount_minor);

    let vendor_pool = distinct_keys(&vendor);
    let internal_pool = distinct_keys(&internal);
    attach_suggestions(&mut rows, &vendor_pool, &internal_pool, &config.suggestion);

    let summary = summarize(&rows);

    Ok(ReconReport {
        meta: ReconMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
        faults,
    })
}

/// Resolve columns and normalize every row of one side. Rows with degenerate
/// keys are excluded (with a fault); unparseable amounts become zero-value
/// transactions (with a fault).
fn prepare_side(
    side: Side,
    table: &RawTable,
    config: &ReconConfig,
    faults: &mut Vec<RowFault>,
) -> Result<Vec<NormalizedRecord>, ReconError> {
    if table.rows.is_empty() {
        return Err(ReconError::EmptyTable { side });
    }

    let pick = resolve_columns(side, &table.headers, &config.schema)?;
    let sign = config.sides.get(side).sign;

    let mut records = Vec::with_capacity(table.rows.len());
    for (i, cells) in table.rows.iter().enumerate() {
        let row_no = i + 1;

        let raw_id = cells.get(pick.identifier).map(String::as_str).unwrap_or("");
        let canonical_key = normalize_identifier(raw_id);
        if canonical_key.is_empty() {
            faults.push(RowFault::EmptyKey { side, row: row_no });
            continue;
        }

        let raw_amount = cells.get(pick.amount).map(String::as_str).unwrap_or("");
        let amount_minor = match normalize_amount(raw_amount) {
            Some(v) => v,
            None => {
                faults.push(RowFault::AmountParse {
                    side,
                    row: row_no,
                    value: raw_amount.to_string(),
                });
                0
            }
        };
        let amount_minor = match sign {
            SignConvention::Raw => amount_minor,
            SignConvention::Absolute => amount_minor.abs(),
        };

        records.push(NormalizedRecord { canonical_key, amount_minor });
    }

    Ok(records)
}

/// Keys of one side in first-seen order — the candidate pool order the
/// suggestion tie-break is defined against.
fn distinct_keys(records: &[NormalizedRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut keys = Vec::new();
    for r in records {
        if seen.insert(r.canonical_key.as_str()) {
            keys.push(r.canonical_key.clone());
        }
    }
    keys
}
