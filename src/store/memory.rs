//! In-memory deed store

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use super::{DeedStore, StoreError};
use crate::deed::models::{Deed, NewDeed};

/// Keeps deeds in a shared vector. Clones share the same records.
#[derive(Clone, Default)]
pub struct InMemoryDeedStore {
    deeds: Arc<RwLock<Vec<Deed>>>,
}

impl InMemoryDeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.deeds.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.deeds.read().is_empty()
    }

    pub fn all(&self) -> Vec<Deed> {
        self.deeds.read().clone()
    }
}

#[async_trait]
impl DeedStore for InMemoryDeedStore {
    async fn create(&self, deed: NewDeed) -> Result<Deed, StoreError> {
        let now = Utc::now();
        let record = Deed {
            id: Uuid::new_v4(),
            full_name: deed.full_name,
            father_name: deed.father_name,
            property_size: deed.property_size,
            sale_amount: deed.sale_amount,
            sale_date: deed.sale_date,
            created_at: now,
            updated_at: now,
        };

        self.deeds.write().push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_deed(name: &str) -> NewDeed {
        NewDeed {
            full_name: name.to_string(),
            father_name: "Mohan Kumar".to_string(),
            property_size: 900.0,
            sale_amount: 1500000.0,
            sale_date: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = InMemoryDeedStore::new();
        let record = store.create(new_deed("Ravi")).await.unwrap();

        assert!(!record.id.is_nil());
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(record.full_name, "Ravi");
        assert_eq!(store.all(), vec![record]);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = InMemoryDeedStore::new();
        let handle = store.clone();

        let first = handle.create(new_deed("Asha")).await.unwrap();
        let second = store.create(new_deed("Vikram")).await.unwrap();

        assert_eq!(store.len(), 2);
        assert_ne!(first.id, second.id);
    }
}
