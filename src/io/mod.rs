//! I/O handling for account snapshots
//!
//! Serialization of selected accounts into portable export documents.
//! - `export`: JSON and CSV snapshot writers

pub mod export;

pub use export::{export_accounts, ExportFormat, ExportRow};
