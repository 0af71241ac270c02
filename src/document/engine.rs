//! Headless Chromium rendering engine.
//!
//! Writes the HTML to a scratch directory, launches one browser process with
//! a private profile, prints the page to PDF and reads the result back. The
//! scratch directory and the child process are owned by guards, so both are
//! released on every exit path, timeouts included.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use tokio::process::Command;

use super::common::is_pdf;
use super::traits::PdfRenderer;
use super::RenderError;

const PAGE_FILE: &str = "deed.html";
const OUTPUT_FILE: &str = "deed.pdf";
const PROFILE_DIR: &str = "profile";
const STDERR_LIMIT: usize = 512;

/// A4 pages, 20mm margins, backgrounds kept.
const PRINT_STYLESHEET: &str = "<style>@page { size: A4; margin: 20mm; } \
html, body { -webkit-print-color-adjust: exact; print-color-adjust: exact; }</style>";

/// Renders HTML to PDF with a fresh headless Chromium per call.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    binary: PathBuf,
    timeout: Duration,
    settle_budget: Duration,
}

impl ChromiumRenderer {
    /// * `binary` - browser executable (e.g. "chromium")
    /// * `timeout` - hard limit for loading the page and capturing the PDF
    /// * `settle_budget` - virtual time granted for network resources to settle
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration, settle_budget: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
            settle_budget,
        }
    }

    fn command(&self, workspace: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("--headless")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-pdf-header-footer")
            .arg("--run-all-compositor-stages-before-draw")
            .arg(format!("--virtual-time-budget={}", self.settle_budget.as_millis()))
            .arg(format!("--user-data-dir={}", workspace.join(PROFILE_DIR).display()))
            .arg(format!("--print-to-pdf={}", workspace.join(OUTPUT_FILE).display()))
            .arg(format!("file://{}", workspace.join(PAGE_FILE).display()))
            .current_dir(workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    async fn run(&self, workspace: &TempDir, html: &str) -> Result<Vec<u8>, RenderError> {
        let page_path = workspace.path().join(PAGE_FILE);
        tokio::fs::write(&page_path, with_print_stylesheet(html))
            .await
            .map_err(RenderError::Workspace)?;

        let child = self
            .command(workspace.path())
            .spawn()
            .map_err(RenderError::Launch)?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(RenderError::Launch)?,
            Err(_) => return Err(RenderError::Timeout(self.timeout)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Exit {
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.chars().take(STDERR_LIMIT).collect(),
            });
        }

        let pdf = tokio::fs::read(workspace.path().join(OUTPUT_FILE))
            .await
            .map_err(RenderError::ReadPdf)?;

        if !is_pdf(&pdf) {
            return Err(RenderError::InvalidOutput);
        }

        Ok(pdf)
    }
}

#[async_trait]
impl PdfRenderer for ChromiumRenderer {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let workspace = tempdir().map_err(RenderError::Workspace)?;
        let result = self.run(&workspace, html).await;

        match &result {
            Ok(pdf) => log::debug!("Chromium produced {} bytes of PDF", pdf.len()),
            Err(e) => log::warn!("Chromium rendering failed: {}", e),
        }

        // `workspace` drops here and removes the page, profile and output.
        result
    }
}

/// Insert the print stylesheet into the document head, or prepend it when
/// the document has no `</head>`.
pub fn with_print_stylesheet(html: &str) -> String {
    match html.find("</head>") {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + PRINT_STYLESHEET.len());
            out.push_str(&html[..pos]);
            out.push_str(PRINT_STYLESHEET);
            out.push_str(&html[pos..]);
            out
        }
        None => format!("{PRINT_STYLESHEET}{html}"),
    }
}
