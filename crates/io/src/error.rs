use std::fmt;

#[derive(Debug)]
pub enum IoError {
    /// File open / read failure.
    Read(String),
    /// Delimited-text parse failure.
    Csv(String),
    /// Workbook open / read / write failure.
    Xlsx(String),
    /// A file with no usable rows.
    Empty(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "read error: {msg}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Xlsx(msg) => write!(f, "XLSX error: {msg}"),
            Self::Empty(msg) => write!(f, "empty input: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}
