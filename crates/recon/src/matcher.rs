use std::collections::BTreeMap;

use crate::model::{NormalizedRecord, ReconRow, Status};

/// Classify one joined key from its pair of optional amounts. Missingness
/// drives the first two branches; value comparison only happens when both
/// sides are present. Strictly-greater tolerance comparison: a variance of
/// exactly `tolerance_minor` is still a match.
pub fn classify(vendor: Option<i64>, internal: Option<i64>, tolerance_minor: i64) -> Status {
    match (vendor, internal) {
        (None, _) => Status::MissingInVendor,
        (_, None) => Status::MissingInBooks,
        (Some(v), Some(i)) => {
            if (v - i).abs() > tolerance_minor {
                Status::AmountMismatch
            } else {
                Status::Matched
            }
        }
    }
}

/// Full outer join of two normalized record sets on canonical key.
///
/// A key repeated within one side keeps only the most-recently-seen amount
/// (last-write-wins — an explicit simplification, no aggregation). Output is
/// ordered by canonical key, so runs are reproducible.
pub fn join_records(
    vendor: &[NormalizedRecord],
    internal: &[NormalizedRecord],
    tolerance_minor: i64,
) -> Vec<ReconRow> {
    let mut vendor_map: BTreeMap<&str, i64> = BTreeMap::new();
    for r in vendor {
        vendor_map.insert(r.canonical_key.as_str(), r.amount_minor);
    }

    let mut internal_map: BTreeMap<&str, i64> = BTreeMap::new();
    for r in internal {
        internal_map.insert(r.canonical_key.as_str(), r.amount_minor);
    }

    let mut keys: Vec<&str> = vendor_map.keys().copied().collect();
    for key in internal_map.keys().copied() {
        if !vendor_map.contains_key(key) {
            keys.push(key);
        }
    }
    keys.sort_unstable();

    keys.into_iter()
        .map(|key| {
            let vendor_minor = vendor_map.get(key).copied();
            let internal_minor = internal_map.get(key).copied();
            // Missing side counts as 0 for the arithmetic only; the
            // classification above sees the optionals themselves.
            let variance_minor = vendor_minor.unwrap_or(0) - internal_minor.unwrap_or(0);
            ReconRow {
                canonical_key: key.to_string(),
                vendor_minor,
                internal_minor,
                variance_minor,
                status: classify(vendor_minor, internal_minor, tolerance_minor),
                suggestion: None,
            }
        })
        .collect()
}
