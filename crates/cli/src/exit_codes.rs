//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of the
//! shell contract — scripts rely on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success — every row matched                         |
//! | 1    | Exceptions found (mismatches / missing rows)        |
//! | 2    | Usage error (bad arguments, missing required flags) |
//! | 3    | IO error (file read/write)                          |
//! | 4    | Parse error (unreadable input, unknown template)    |
//! | 5    | Invalid config                                      |
//! | 6    | Schema resolution failed (no id/amount column)      |

/// Success - reconciliation completed with every row matched.
pub const EXIT_SUCCESS: u8 = 0;

/// Exceptions found. Like `diff(1)`, exit 1 means "the ledgers differ."
pub const EXIT_EXCEPTIONS: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// IO error reading inputs or writing outputs.
pub const EXIT_IO_ERROR: u8 = 3;

/// Parse error - unreadable input file or statement.
pub const EXIT_PARSE_ERROR: u8 = 4;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// Schema resolution failed for one side.
pub const EXIT_SCHEMA_ERROR: u8 = 6;
