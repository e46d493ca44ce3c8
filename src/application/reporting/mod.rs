//! Reporting module
//!
//! Orchestrates the upstream fetches, merges their results into the
//! unified report model, and renders the output document.

pub mod formats;
pub mod service;

pub use service::{ExportOptions, PdfExporter, ReportGenerator};
