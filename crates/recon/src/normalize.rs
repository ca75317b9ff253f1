//! Key and amount normalization.
//!
//! Canonical keys are format-insensitive: `"INV-0001"`, `"inv0001"` and
//! `"0001"` all normalize to `"1"`. Amounts become i64 minor units — money
//! never touches a float.

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Derive the canonical key from a raw identifier cell.
///
/// Keeps letters and digits only, uppercases, then strips the leading run of
/// letters and zeros — the human-variable prefix. `"INV-0042"`, `"inv0042"`
/// and `"00042"` all become `"42"`; `"INV-0002X"` becomes `"2X"`.
///
/// Idempotent: every non-empty result starts with a nonzero digit, which the
/// strip never touches. May return `""` (e.g. for `"000"` or a purely
/// symbolic cell) — the caller flags that as a degenerate key and excludes
/// the row from the join.
pub fn normalize_identifier(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect();
    cleaned
        .trim_start_matches(|c: char| c == '0' || c.is_alphabetic())
        .to_string()
}

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Parse a financial amount string into minor units, rounding half-up to two
/// fractional digits. Integer math throughout.
///
/// Accepts currency symbols, thousands separators, internal whitespace,
/// leading `-`/`+`, and `(x)` for negatives. Returns `None` when non-numeric
/// residue remains — the engine maps that to a zero-value transaction and
/// records a fault.
pub fn normalize_amount(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Parenthesized negatives: (1,234.50) → -1234.50
    let (paren_negative, inner) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (true, &trimmed[1..trimmed.len() - 1])
    } else {
        (false, trimmed)
    };

    let cleaned: String = inner
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let (sign_negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };
    // A minus inside parentheses is a malformed cell, not a double negative.
    if paren_negative && sign_negative {
        return None;
    }

    let (int_part, frac_part) = match digits.find('.') {
        Some(dot) => (&digits[..dot], &digits[dot + 1..]),
        None => (digits, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole: i64 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };

    let fb = frac_part.as_bytes();
    let mut cents: i64 = 0;
    if !fb.is_empty() {
        cents += i64::from(fb[0] - b'0') * 10;
    }
    if fb.len() >= 2 {
        cents += i64::from(fb[1] - b'0');
    }
    // Half-up on the third fractional digit.
    if fb.len() >= 3 && fb[2] >= b'5' {
        cents += 1;
    }

    let minor = whole.checked_mul(100)?.checked_add(cents)?;
    Some(if paren_negative || sign_negative { -minor } else { minor })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
