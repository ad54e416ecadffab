//! Persistence of short code → URL mappings.
//!
//! Handlers only see [`LinkStore`]; which backend sits behind it is chosen
//! once at startup from [`crate::config::StorageBackend`].

use async_trait::async_trait;
use thiserror::Error;

use crate::models::LinkMapping;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The short code is already taken. Existing mappings are never overwritten.
    #[error("short code '{0}' already exists")]
    Duplicate(String),

    #[error("storage backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert a new mapping. Either the mapping is recorded under `code`
    /// or nothing is written.
    async fn put(&self, code: &str, url: &str) -> Result<LinkMapping, StoreError>;

    /// Exact-match lookup of a short code.
    async fn get(&self, code: &str) -> Result<Option<String>, StoreError>;

    /// At most `limit` mappings, newest first.
    async fn list(&self, limit: usize) -> Result<Vec<LinkMapping>, StoreError>;
}
