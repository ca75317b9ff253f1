//! Fuzzy typo-match suggestions for missing-side rows.
//!
//! Suggestions are advisory annotations for human review; they never change
//! a row's status and this stage never fails — no candidates or sub-threshold
//! scores simply leave rows unannotated.

use crate::config::SuggestionPolicy;
use crate::model::{ReconRow, Status, SuggestionNote};

/// Similarity between two canonical keys in 0–100.
///
/// Base score is normalized Levenshtein. When one key is at least 1.5× the
/// other's length, the best same-length window of the longer key is also
/// scored and scaled by 0.9 — so a truncation or suffix typo like `"2"` vs
/// `"2X"` still lands at 90 rather than being punished for the length gap.
pub fn similarity(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }

    let full = (strsim::normalized_levenshtein(a, b) * 100.0).round() as u8;

    let (short, long) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    let short_len = short.chars().count();
    let long_len = long.chars().count();

    if (long_len as f64) < 1.5 * short_len as f64 {
        return full;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let mut best_window = 0.0_f64;
    for window in long_chars.windows(short_len) {
        let candidate: String = window.iter().collect();
        best_window = best_window.max(strsim::normalized_levenshtein(short, &candidate));
    }
    let partial = (best_window * 90.0).round() as u8;

    full.max(partial)
}

/// Attach the best above-threshold candidate to every eligible row.
///
/// The candidate pool is the opposite side's canonical keys: internal keys
/// for missing-in-books rows, vendor keys for missing-in-vendor. Ties keep
/// the first candidate in pool order (strictly-greater update), so repeated
/// runs produce identical suggestions.
pub fn attach_suggestions(
    rows: &mut [ReconRow],
    vendor_keys: &[String],
    internal_keys: &[String],
    policy: &SuggestionPolicy,
) {
    for row in rows.iter_mut() {
        if !policy.statuses.contains(&row.status) {
            continue;
        }
        let pool = match row.status {
            Status::MissingInBooks => internal_keys,
            Status::MissingInVendor => vendor_keys,
            _ => continue,
        };
        if pool.is_empty() {
            continue;
        }

        if policy.min_key_len > 0 && row.canonical_key.chars().count() < policy.min_key_len {
            continue;
        }
        if policy.skip_zero_amount {
            let present = row.vendor_minor.or(row.internal_minor).unwrap_or(0);
            if present == 0 {
                continue;
            }
        }

        let mut best: Option<(&String, u8)> = None;
        for candidate in pool {
            let score = similarity(&row.canonical_key, candidate);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }

        if let Some((candidate, score)) = best {
            if score >= policy.threshold {
                row.suggestion = Some(SuggestionNote {
                    candidate_key: candidate.clone(),
                    score,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_in_books(key: &str, vendor_minor: i64) -> ReconRow {
        ReconRow {
            canonical_key: key.into(),
            vendor_minor: Some(vendor_minor),
            internal_minor: None,
            variance_minor: vendor_minor,
            status: Status::MissingInBooks,
            suggestion: None,
        }
    }

    #[test]
    fn similarity_extremes() {
        assert_eq!(similarity("42", "42"), 100);
        assert_eq!(similarity("", "42"), 0);
        assert_eq!(similarity("42", ""), 0);
    }

    #[test]
    fn similarity_suffix_typo_scores_90() {
        // The partial-window path: "2" is a perfect window of "2X".
        assert_eq!(similarity("2", "2X"), 90);
        assert_eq!(similarity("2X", "2"), 90);
    }

    #[test]
    fn similarity_close_keys_score_high() {
        assert!(similarity("10023", "10024") >= 80);
        assert!(similarity("ABC123", "ABC124") >= 80);
    }

    #[test]
    fn similarity_distant_keys_score_low() {
        assert!(similarity("12345", "98761") < 50);
    }

    #[test]
    fn attaches_above_threshold_without_changing_status() {
        let mut rows = vec![missing_in_books("2", 5000)];
        let internal = vec!["2X".to_string(), "77".to_string()];
        attach_suggestions(&mut rows, &[], &internal, &SuggestionPolicy::default());

        assert_eq!(rows[0].status, Status::MissingInBooks);
        let note = rows[0].suggestion.as_ref().expect("suggestion attached");
        assert_eq!(note.candidate_key, "2X");
        assert_eq!(note.score, 90);
    }

    #[test]
    fn no_suggestion_below_threshold() {
        let mut rows = vec![missing_in_books("12345", 5000)];
        let internal = vec!["98761".to_string()];
        attach_suggestions(&mut rows, &[], &internal, &SuggestionPolicy::default());
        assert!(rows[0].suggestion.is_none());
    }

    #[test]
    fn empty_pool_is_not_an_error() {
        let mut rows = vec![missing_in_books("42", 5000)];
        attach_suggestions(&mut rows, &[], &[], &SuggestionPolicy::default());
        assert!(rows[0].suggestion.is_none());
    }

    #[test]
    fn tie_break_keeps_first_pool_candidate() {
        let mut rows = vec![missing_in_books("42", 5000)];
        // Both candidates score identically against "42"
        let internal = vec!["42A".to_string(), "42B".to_string()];
        let policy = SuggestionPolicy { threshold: 60, ..Default::default() };

        attach_suggestions(&mut rows, &[], &internal, &policy);
        let first = rows[0].suggestion.clone().unwrap();
        assert_eq!(first.candidate_key, "42A");

        // Determinism: re-running over a fresh row reproduces the note.
        let mut again = vec![missing_in_books("42", 5000)];
        attach_suggestions(&mut again, &[], &internal, &policy);
        assert_eq!(again[0].suggestion, Some(first));
    }

    #[test]
    fn status_filter_respects_policy() {
        let mut rows = vec![ReconRow {
            canonical_key: "2".into(),
            vendor_minor: None,
            internal_minor: Some(5000),
            variance_minor: -5000,
            status: Status::MissingInVendor,
            suggestion: None,
        }];
        let vendor = vec!["2X".to_string()];

        // Default policy: missing-in-vendor is not eligible.
        attach_suggestions(&mut rows, &vendor, &[], &SuggestionPolicy::default());
        assert!(rows[0].suggestion.is_none());

        // Opt in, and the vendor pool is searched.
        let policy = SuggestionPolicy {
            statuses: vec![Status::MissingInBooks, Status::MissingInVendor],
            ..Default::default()
        };
        attach_suggestions(&mut rows, &vendor, &[], &policy);
        assert_eq!(rows[0].suggestion.as_ref().unwrap().candidate_key, "2X");
    }

    #[test]
    fn guard_clauses_skip_rows() {
        let policy = SuggestionPolicy {
            min_key_len: 2,
            skip_zero_amount: true,
            ..Default::default()
        };
        let internal = vec!["2X".to_string()];

        // Key too short
        let mut rows = vec![missing_in_books("2", 5000)];
        attach_suggestions(&mut rows, &[], &internal, &policy);
        assert!(rows[0].suggestion.is_none());

        // Zero amount
        let mut rows = vec![missing_in_books("2X", 0)];
        attach_suggestions(&mut rows, &[], &internal, &policy);
        assert!(rows[0].suggestion.is_none());
    }
}
