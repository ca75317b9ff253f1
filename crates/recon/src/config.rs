use serde::Deserialize;

use crate::error::ReconError;
use crate::model::{Side, Status};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Process-scoped configuration for one reconciliation run. Immutable while
/// the run is in flight. Every section has a usable default so an empty TOML
/// document is a valid config.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub schema: KeywordTable,
    #[serde(default)]
    pub sides: SidesConfig,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub suggestion: SuggestionPolicy,
}

fn default_name() -> String {
    "reconciliation".into()
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            schema: KeywordTable::default(),
            sides: SidesConfig::default(),
            tolerance: ToleranceConfig::default(),
            suggestion: SuggestionPolicy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Schema keywords
// ---------------------------------------------------------------------------

/// Ordered keyword lists driving column-role inference. Matching is
/// substring containment against canonicalized header names; first column
/// satisfying any keyword wins.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordTable {
    #[serde(default = "default_identifier_keywords")]
    pub identifier_keywords: Vec<String>,
    #[serde(default = "default_amount_keywords")]
    pub amount_keywords: Vec<String>,
}

fn default_identifier_keywords() -> Vec<String> {
    ["inv", "num", "id", "ref", "voucher", "external document"]
        .map(String::from)
        .to_vec()
}

fn default_amount_keywords() -> Vec<String> {
    ["amt", "val", "total", "amount", "due", "price"]
        .map(String::from)
        .to_vec()
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            identifier_keywords: default_identifier_keywords(),
            amount_keywords: default_amount_keywords(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sides
// ---------------------------------------------------------------------------

/// Amount-sign convention for one side. `Absolute` is used when that side's
/// export is signed-debit but must compare against face values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignConvention {
    Raw,
    Absolute,
}

impl Default for SignConvention {
    fn default() -> Self {
        Self::Raw
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SideConfig {
    #[serde(default)]
    pub sign: SignConvention,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SidesConfig {
    #[serde(default)]
    pub vendor: SideConfig,
    #[serde(default)]
    pub internal: SideConfig,
}

impl SidesConfig {
    pub fn get(&self, side: Side) -> &SideConfig {
        match side {
            Side::Vendor => &self.vendor,
            Side::Internal => &self.internal,
        }
    }
}

// ---------------------------------------------------------------------------
// Tolerance + Suggestion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ToleranceConfig {
    /// Mismatch tolerance in minor units. Strictly-greater comparison:
    /// a variance of exactly this many cents is still a match.
    #[serde(default = "default_tolerance_minor")]
    pub amount_minor: i64,
}

fn default_tolerance_minor() -> i64 {
    5
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self { amount_minor: default_tolerance_minor() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionPolicy {
    /// Minimum similarity (0–100) for a suggestion to attach.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Statuses eligible for suggestions. Missing-in-books is the canonical
    /// "typo on the vendor side" case; some deployments add missing-in-vendor.
    #[serde(default = "default_suggestion_statuses")]
    pub statuses: Vec<Status>,
    /// Skip rows whose canonical key is shorter than this many characters.
    #[serde(default)]
    pub min_key_len: usize,
    /// Skip rows whose present-side amount is zero.
    #[serde(default)]
    pub skip_zero_amount: bool,
}

fn default_threshold() -> u8 {
    90
}

fn default_suggestion_statuses() -> Vec<Status> {
    vec![Status::MissingInBooks]
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            statuses: default_suggestion_statuses(),
            min_key_len: 0,
            skip_zero_amount: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.suggestion.threshold > 100 {
            return Err(ReconError::ConfigValidation(format!(
                "suggestion threshold must be 0–100, got {}",
                self.suggestion.threshold
            )));
        }

        if self.schema.identifier_keywords.is_empty() {
            return Err(ReconError::ConfigValidation(
                "identifier_keywords must not be empty".into(),
            ));
        }
        if self.schema.amount_keywords.is_empty() {
            return Err(ReconError::ConfigValidation(
                "amount_keywords must not be empty".into(),
            ));
        }

        if self.tolerance.amount_minor < 0 {
            return Err(ReconError::ConfigValidation(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance.amount_minor
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
