//! `bookmatch-io` — file ingestion and report export.
//!
//! Readers deliver a [`bookmatch_recon::RawTable`] (headers + text cells) to
//! the engine; the writer turns a finished report into a multi-sheet
//! workbook. All format concerns live here — the engine never touches files.

pub mod csv;
pub mod error;
pub mod xlsx;

pub use error::IoError;
