//! In-process store engine.
//!
//! Holds items in the persisted layout so reads go through the same decode
//! path a managed table would.

use async_trait::async_trait;
use dashmap::DashMap;

use super::item::{Item, VisitRecord};
use super::VisitStore;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    table_name: String,
    items: DashMap<String, Item>,
}

impl MemoryStore {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            items: DashMap::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert a raw item, bypassing `put`. Used to seed legacy layouts.
    pub fn insert_item(&self, id: impl Into<String>, item: Item) {
        self.items.insert(id.into(), item);
    }
}

#[async_trait]
impl VisitStore for MemoryStore {
    async fn put(&self, id: &str, ts_ms: i64) -> Result<(), StoreError> {
        let item = VisitRecord::new(id, ts_ms).to_item();
        self.items.insert(id.to_string(), item);
        tracing::trace!(table = %self.table_name, id = %id, "item written");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<VisitRecord>, StoreError> {
        match self.items.get(id) {
            Some(item) => VisitRecord::from_item(item.value()).map(Some),
            None => Ok(None),
        }
    }
}
