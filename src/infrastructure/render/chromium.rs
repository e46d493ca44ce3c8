//! PDF export through a headless Chromium instance
//!
//! The document is written to a temporary file and loaded over file://
//! so the browser resolves it like any local page. The whole export runs
//! on a blocking thread under a single timeout that covers browser
//! launch, navigation, and printing.

use std::fmt::Display;
use std::io::Write;

use async_trait::async_trait;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use tracing::debug;

use crate::application::errors::ReportError;
use crate::application::reporting::{ExportOptions, PdfExporter};

const A4_WIDTH_INCHES: f64 = 8.27;
const A4_HEIGHT_INCHES: f64 = 11.69;

/// Exports reports to PDF by printing them in headless Chromium.
///
/// A fresh browser is launched per export and shut down when it goes out
/// of scope, on success and on every error path alike.
#[derive(Debug, Default)]
pub struct ChromiumExporter;

impl ChromiumExporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PdfExporter for ChromiumExporter {
    async fn export(&self, html: &str, options: &ExportOptions) -> Result<Vec<u8>, ReportError> {
        let html = html.to_string();
        let options = options.clone();
        let timeout = options.timeout;

        let export = tokio::task::spawn_blocking(move || print_pdf(&html, &options));

        match tokio::time::timeout(timeout, export).await {
            Ok(joined) => joined.map_err(render_err)?,
            Err(_) => Err(ReportError::Render(format!(
                "PDF export timed out after {}s",
                timeout.as_secs()
            ))),
        }
    }
}

fn print_pdf(html: &str, options: &ExportOptions) -> Result<Vec<u8>, ReportError> {
    let mut page = tempfile::Builder::new()
        .prefix("secgate-")
        .suffix(".html")
        .tempfile()?;
    page.write_all(html.as_bytes())?;
    page.flush()?;

    let url = format!("file://{}", page.path().display());
    debug!(%url, "printing report document");

    let launch_options = LaunchOptions::default_builder()
        .headless(true)
        .build()
        .map_err(render_err)?;

    // Dropping the browser tears the child process down on every exit path.
    let browser = Browser::new(launch_options).map_err(render_err)?;
    let tab = browser.new_tab().map_err(render_err)?;

    tab.navigate_to(&url).map_err(render_err)?;
    tab.wait_until_navigated().map_err(render_err)?;

    let pdf_options = PrintToPdfOptions {
        display_header_footer: Some(true),
        header_template: Some(options.header_template.clone()),
        footer_template: Some(options.footer_template.clone()),
        print_background: Some(true),
        prefer_css_page_size: Some(true),
        scale: Some(options.scale),
        paper_width: Some(A4_WIDTH_INCHES),
        paper_height: Some(A4_HEIGHT_INCHES),
        margin_top: Some(0.0),
        margin_bottom: Some(0.0),
        margin_left: Some(0.0),
        margin_right: Some(0.0),
        ..Default::default()
    };

    tab.print_to_pdf(Some(pdf_options)).map_err(render_err)
}

fn render_err<E: Display>(error: E) -> ReportError {
    ReportError::Render(error.to_string())
}
