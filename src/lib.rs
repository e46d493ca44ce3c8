//! Secgate - quality-gate and dependency security report generator
//!
//! This crate wires together two upstream REST services (a code-quality
//! service and a dependency vulnerability scanner), merges their answers
//! into a single report model, renders it as HTML, and exports the result
//! to PDF through a headless Chromium collaborator.
//!
//! # Modules
//!
//! - [`config`] - Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] - Report entities and value objects
//! - [`application`] - Pipeline orchestration, rendering, and error types
//! - [`infrastructure`] - Upstream API clients and the PDF export collaborator
//! - [`logging`] - Structured logging with tracing
//!
//! # Configuration
//!
//! Environment variables use the `SECGATE__` prefix with double underscore
//! separators:
//!
//! ```bash
//! SECGATE__QUALITY__PROJECT_KEY=my-service
//! SECGATE__VULNERABILITY__ORG_ID=deadbeef
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use application::reporting::{ExportOptions, PdfExporter, ReportGenerator};
pub use config::Config;
pub use infrastructure::render::ChromiumExporter;
pub use logging::init_tracing;
