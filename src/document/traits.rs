//! Traits for the document generation seam.

use async_trait::async_trait;

use super::RenderError;

/// Converts a complete HTML document into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}
