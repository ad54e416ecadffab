use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use super::{LinkStore, StoreError};
use crate::models::LinkMapping;

/// Process-local store: short_code -> (id, original_url).
///
/// Nothing is persisted; every mapping is lost when the process exits.
/// Inserts go through the DashMap entry API, which holds the shard lock
/// across the existence check and the write.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, (i64, String)>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mappings currently held.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn put(&self, code: &str, url: &str) -> Result<LinkMapping, StoreError> {
        match self.inner.entry(code.to_owned()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(code.to_owned())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                slot.insert((id, url.to_owned()));
                Ok(LinkMapping {
                    id,
                    short_code: code.to_owned(),
                    original_url: url.to_owned(),
                })
            }
        }
    }

    async fn get(&self, code: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.get(code).map(|v| v.1.clone()))
    }

    async fn list(&self, limit: usize) -> Result<Vec<LinkMapping>, StoreError> {
        let mut links: Vec<LinkMapping> = self
            .inner
            .iter()
            .map(|entry| LinkMapping {
                id: entry.value().0,
                short_code: entry.key().clone(),
                original_url: entry.value().1.clone(),
            })
            .collect();

        links.sort_unstable_by(|a, b| b.id.cmp(&a.id));
        links.truncate(limit);
        Ok(links)
    }
}
