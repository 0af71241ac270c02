//! Shared application state injected into every handler.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::document::{ChromiumRenderer, PdfRenderer};
use crate::store::{DeedStore, InMemoryDeedStore, PgDeedStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DeedStore + Send + Sync>,
    pub renderer: Arc<dyn PdfRenderer + Send + Sync>,
    pub template_path: PathBuf,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DeedStore + Send + Sync>,
        renderer: Arc<dyn PdfRenderer + Send + Sync>,
        template_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            renderer,
            template_path: template_path.into(),
        }
    }

    /// Create the long-lived collaborators once, at startup.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn DeedStore + Send + Sync> = match &config.database_url {
            Some(url) => Arc::new(PgDeedStore::connect(url, config.max_db_connections).await?),
            None => {
                log::warn!("DATABASE_URL not set, deeds will be kept in memory only");
                Arc::new(InMemoryDeedStore::new())
            }
        };

        let renderer = Arc::new(ChromiumRenderer::new(
            config.browser.binary.clone(),
            config.browser.timeout,
            config.browser.settle_budget,
        ));

        if !config.template_path.is_file() {
            log::warn!(
                "Deed template not found at {}, submissions will fail until it exists",
                config.template_path.display()
            );
        }

        Ok(Self::new(store, renderer, config.template_path.clone()))
    }

    /// Tear down collaborators at shutdown.
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
