//! Document module - turns a stored deed into a downloadable PDF.
//!
//! - `template` - loads the HTML template and substitutes deed fields
//! - `engine` - drives headless Chromium to print HTML to PDF
//! - `common` - formatting and path helpers shared by both

pub mod common;
pub mod engine;
pub mod template;
pub mod traits;

pub use engine::ChromiumRenderer;
pub use template::{deed_context, load_template, render_template, TemplateContext, TemplateError};
pub use traits::PdfRenderer;

use std::time::Duration;
use thiserror::Error;

/// File name offered to the client for every generated deed.
pub const DEED_FILENAME: &str = "SaleDeed.pdf";

/// Errors raised while converting HTML to PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering timed out after {0:?}")]
    Timeout(Duration),
    #[error("failed to prepare rendering workspace: {0}")]
    Workspace(#[source] std::io::Error),
    #[error("failed to launch browser: {0}")]
    Launch(#[source] std::io::Error),
    #[error("browser exited with status {code}: {stderr}")]
    Exit { code: i32, stderr: String },
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("browser produced output that is not a PDF")]
    InvalidOutput,
}

impl RenderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RenderError::Timeout(_))
    }

    /// Short description safe to show to clients. Browser output stays in the logs.
    pub fn summary(&self) -> &'static str {
        match self {
            RenderError::Timeout(_) => "rendering timed out",
            RenderError::Workspace(_) => "rendering workspace unavailable",
            RenderError::Launch(_) => "browser could not be started",
            RenderError::Exit { .. } => "browser exited with an error",
            RenderError::ReadPdf(_) => "browser produced no PDF",
            RenderError::InvalidOutput => "browser output was not a PDF",
        }
    }
}
