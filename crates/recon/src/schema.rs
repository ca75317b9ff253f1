use crate::config::KeywordTable;
use crate::error::ReconError;
use crate::model::Side;

// ---------------------------------------------------------------------------
// Column roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Identifier,
    Amount,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Identifier => "identifier",
            ColumnRole::Amount => "amount",
        }
    }
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header indices chosen for one record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPick {
    pub identifier: usize,
    pub amount: usize,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Case-fold, trim, and collapse internal whitespace runs to single spaces.
pub fn canonicalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pick the identifier and amount columns from a header list.
///
/// First column (left-to-right) whose canonical name contains any keyword
/// wins — no scoring among candidates. The identifier pick is excluded from
/// amount consideration so one column never fills both roles.
pub fn resolve_columns(
    side: Side,
    headers: &[String],
    keywords: &KeywordTable,
) -> Result<ColumnPick, ReconError> {
    let canonical: Vec<String> = headers.iter().map(|h| canonicalize_header(h)).collect();

    let identifier = canonical
        .iter()
        .position(|h| keywords.identifier_keywords.iter().any(|k| h.contains(k.as_str())))
        .ok_or_else(|| ReconError::SchemaNotFound {
            side,
            role: ColumnRole::Identifier,
            headers: headers.to_vec(),
        })?;

    let amount = canonical
        .iter()
        .enumerate()
        .position(|(i, h)| {
            i != identifier && keywords.amount_keywords.iter().any(|k| h.contains(k.as_str()))
        })
        .ok_or_else(|| ReconError::SchemaNotFound {
            side,
            role: ColumnRole::Amount,
            headers: headers.to_vec(),
        })?;

    Ok(ColumnPick { identifier, amount })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn canonicalize_folds_case_and_whitespace() {
        assert_eq!(canonicalize_header("  Invoice   #  "), "invoice #");
        assert_eq!(canonicalize_header("External\tDocument Number"), "external document number");
    }

    #[test]
    fn picks_first_match_left_to_right() {
        let h = headers(&["Date", "Voucher Ref", "Invoice No", "Amount Due"]);
        let pick = resolve_columns(Side::Vendor, &h, &KeywordTable::default()).unwrap();
        // "Voucher Ref" precedes "Invoice No" and both match
        assert_eq!(pick.identifier, 1);
        assert_eq!(pick.amount, 3);
    }

    #[test]
    fn tolerates_varied_institution_headers() {
        for (id_header, amt_header) in [
            ("Invoice #", "Total"),
            ("External document number", "Amount (USD)"),
            ("Ref", "Price"),
            ("ID", "Val."),
        ] {
            let h = headers(&[id_header, amt_header]);
            let pick = resolve_columns(Side::Internal, &h, &KeywordTable::default())
                .unwrap_or_else(|e| panic!("{id_header}/{amt_header}: {e}"));
            assert_eq!(pick.identifier, 0);
            assert_eq!(pick.amount, 1);
        }
    }

    #[test]
    fn identifier_column_not_reused_for_amount() {
        // "Invoice Total" matches both keyword lists; with no other amount
        // column the set is unusable rather than self-reconciling.
        let h = headers(&["Invoice Total", "Memo"]);
        let err = resolve_columns(Side::Vendor, &h, &KeywordTable::default()).unwrap_err();
        assert!(err.to_string().contains("no amount column"));
    }

    #[test]
    fn missing_identifier_is_fatal_and_names_headers() {
        let h = headers(&["Date", "Memo", "Amount"]);
        let err = resolve_columns(Side::Vendor, &h, &KeywordTable::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("vendor file"));
        assert!(msg.contains("no identifier column"));
        assert!(msg.contains("Memo"));
    }

    #[test]
    fn missing_amount_is_fatal_per_side() {
        let h = headers(&["Invoice", "Memo"]);
        let err = resolve_columns(Side::Internal, &h, &KeywordTable::default()).unwrap_err();
        assert!(err.to_string().contains("internal file"));
    }

    #[test]
    fn custom_keyword_table() {
        let kw = KeywordTable {
            identifier_keywords: vec!["bill".into()],
            amount_keywords: vec!["charge".into()],
        };
        let h = headers(&["Bill No", "Charge"]);
        let pick = resolve_columns(Side::Vendor, &h, &kw).unwrap();
        assert_eq!(pick.identifier, 0);
        assert_eq!(pick.amount, 1);
    }
}
