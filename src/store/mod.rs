//! Record store - persistence for deed records.
//!
//! - `postgres` - production store backed by a `sqlx` connection pool
//! - `memory` - in-process store for local development and tests

mod memory;
mod postgres;

pub use memory::InMemoryDeedStore;
pub use postgres::PgDeedStore;

use async_trait::async_trait;

use crate::deed::models::{Deed, NewDeed};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Write-only persistence for deeds. Records are created once and never
/// updated or deleted here.
#[async_trait]
pub trait DeedStore: Send + Sync {
    /// Persist a new deed and return the stored record.
    async fn create(&self, deed: NewDeed) -> Result<Deed, StoreError>;

    /// Release connections at shutdown.
    async fn close(&self) {}
}
