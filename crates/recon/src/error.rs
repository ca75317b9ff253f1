use std::fmt;

use crate::model::Side;
use crate::schema::ColumnRole;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, empty keyword list, etc.).
    ConfigValidation(String),
    /// No column matched the keyword list for a role. Fatal to that record
    /// set; the observed headers are included for operator diagnosis.
    SchemaNotFound {
        side: Side,
        role: ColumnRole,
        headers: Vec<String>,
    },
    /// A record set with headers but no data rows.
    EmptyTable { side: Side },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::SchemaNotFound { side, role, headers } => {
                write!(
                    f,
                    "{side} file: no {role} column recognized among [{}]",
                    headers.join(", ")
                )
            }
            Self::EmptyTable { side } => write!(f, "{side} file has no data rows"),
        }
    }
}

impl std::error::Error for ReconError {}
