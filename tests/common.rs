#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sale_deed_server::deed::models::{Deed, NewDeed};
use sale_deed_server::document::common::get_templates_dir;
use sale_deed_server::document::{PdfRenderer, RenderError};
use sale_deed_server::store::{DeedStore, InMemoryDeedStore, StoreError};
use sale_deed_server::AppState;

/// How the fake renderer answers.
#[derive(Debug, Clone, Copy)]
pub enum RenderOutcome {
    Pdf,
    Timeout,
    Crash,
}

/// Stand-in for Chromium: returns a tiny PDF that embeds the rendered HTML.
pub struct FakeRenderer {
    calls: AtomicUsize,
    outcome: RenderOutcome,
}

impl FakeRenderer {
    pub fn new(outcome: RenderOutcome) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PdfRenderer for FakeRenderer {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            RenderOutcome::Pdf => {
                let mut pdf = b"%PDF-1.4\n".to_vec();
                pdf.extend_from_slice(html.as_bytes());
                Ok(pdf)
            }
            RenderOutcome::Timeout => Err(RenderError::Timeout(Duration::from_secs(30))),
            RenderOutcome::Crash => Err(RenderError::Exit {
                code: 1,
                stderr: "renderer crashed".to_string(),
            }),
        }
    }
}

/// Store whose backing database is unreachable.
pub struct UnreachableStore;

#[async_trait]
impl DeedStore for UnreachableStore {
    async fn create(&self, _deed: NewDeed) -> Result<Deed, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub fn bundled_template() -> PathBuf {
    get_templates_dir().join("deed_template.html")
}

pub struct TestContext {
    pub state: AppState,
    pub store: InMemoryDeedStore,
    pub renderer: Arc<FakeRenderer>,
}

pub fn test_context(outcome: RenderOutcome, template_path: PathBuf) -> TestContext {
    let store = InMemoryDeedStore::new();
    let renderer = Arc::new(FakeRenderer::new(outcome));
    let state = AppState::new(Arc::new(store.clone()), renderer.clone(), template_path);
    TestContext {
        state,
        store,
        renderer,
    }
}

pub fn valid_body() -> Value {
    json!({
        "fullName": "Ravi Kumar",
        "fatherName": "Mohan Kumar",
        "propertySize": "1200",
        "saleAmount": 2500000,
        "date": "2024-03-15"
    })
}
