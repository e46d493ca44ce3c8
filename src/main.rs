//! Secgate - report generator entry point
//!
//! Runs one report-generation pass: fetch metrics from both upstream
//! services, merge, render, and write the output artifact. Any fetch or
//! render failure aborts the run and the process exits non-zero.

use std::sync::Arc;

use secgate::{ChromiumExporter, Config, ReportGenerator, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        // Only warn if it's not a "file not found" error
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Load configuration (includes validation)
    let config = Config::load().map_err(|e| {
        std::io::Error::other(format!(
            "Failed to load configuration. Check config/ files and SECGATE__* env vars: {}",
            e
        ))
    })?;

    // Initialize tracing (after config is loaded so we can use logging config)
    init_tracing(&config.logging)?;

    tracing::info!(
        project_key = %config.quality.project_key,
        format = ?config.report.format,
        "Starting report generation"
    );

    let exporter = Arc::new(ChromiumExporter::new());
    let generator = ReportGenerator::new(config, exporter)?;

    match generator.run().await {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Report written");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Report generation failed");
            std::process::exit(1);
        }
    }
}
