//! `bookmatch-recon` — vendor-statement vs internal-books reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded tables, returns classified rows.
//! No CLI or IO dependencies.

pub mod bucket;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod schema;
pub mod suggest;

pub use config::ReconConfig;
pub use engine::{run, ReconInput};
pub use error::ReconError;
pub use model::{RawTable, ReconReport, ReconRow, Status};
