#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};
use tinylink::{
    config::AppConfig,
    models::LinkMapping,
    store::{LinkStore, MemoryStore, SqliteStore, StoreError},
    AppState,
};

pub fn test_config(pairs: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Fresh in-memory SQLite database with the schema applied.
pub async fn sqlite_store() -> SqliteStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    let store = SqliteStore::from_pool(pool);
    store.migrate().await.unwrap();
    store
}

pub fn server_with(store: Arc<dyn LinkStore>, config: AppConfig) -> TestServer {
    let state = Arc::new(AppState::new(store, config));
    TestServer::new(tinylink::router(state)).unwrap()
}

pub async fn sqlite_server() -> TestServer {
    server_with(Arc::new(sqlite_store().await), test_config(&[]))
}

pub fn memory_server() -> TestServer {
    server_with(Arc::new(MemoryStore::new()), test_config(&[]))
}

/// POST /shorten and return the code at the end of the short URL.
pub async fn create(server: &TestServer, url: &str) -> String {
    let response = server.post("/shorten").json(&json!({ "url": url })).await;
    response.assert_status_ok();

    let short_url = response.json::<serde_json::Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_owned();
    short_url.rsplit('/').next().unwrap().to_owned()
}

/// Store double that fails on demand.
///
/// The first `collisions` puts report a duplicate code; when `broken` is set
/// every call fails as the backend would.
pub struct ScriptedStore {
    inner: MemoryStore,
    collisions: AtomicUsize,
    broken: bool,
    pub puts: AtomicUsize,
    pub reads: AtomicUsize,
}

impl ScriptedStore {
    pub fn colliding(collisions: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            collisions: AtomicUsize::new(collisions),
            broken: false,
            puts: AtomicUsize::new(0),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::colliding(0)
        }
    }

    pub fn stored(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl LinkStore for ScriptedStore {
    async fn put(&self, code: &str, url: &str) -> Result<LinkMapping, StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(StoreError::Backend(sqlx::Error::PoolTimedOut));
        }

        let collide = self
            .collisions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if collide {
            return Err(StoreError::Duplicate(code.to_owned()));
        }

        self.inner.put(code, url).await
    }

    async fn get(&self, code: &str) -> Result<Option<String>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(StoreError::Backend(sqlx::Error::PoolTimedOut));
        }
        self.inner.get(code).await
    }

    async fn list(&self, limit: usize) -> Result<Vec<LinkMapping>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(StoreError::Backend(sqlx::Error::PoolTimedOut));
        }
        self.inner.list(limit).await
    }
}
