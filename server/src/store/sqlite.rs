use async_trait::async_trait;
use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use super::{LinkStore, StoreError};
use crate::models::LinkMapping;

/// Durable store backed by the single `urls` table.
///
/// The `UNIQUE` constraint on `short_code` is the only collision guard, so
/// two concurrent inserts of the same code can never both succeed.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a pool on `database_url`, creating the database file if needed.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(
                database_url
                    .parse::<SqliteConnectOptions>()?
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal),
            )
            .await?;

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply the embedded migrations. Safe to run on every startup.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl LinkStore for SqliteStore {
    async fn put(&self, code: &str, url: &str) -> Result<LinkMapping, StoreError> {
        let inserted = sqlx::query("INSERT INTO urls (short_code, original_url) VALUES (?1, ?2)")
            .bind(code)
            .bind(url)
            .execute(&self.pool)
            .await;

        match inserted {
            Ok(done) => Ok(LinkMapping {
                id: done.last_insert_rowid(),
                short_code: code.to_owned(),
                original_url: url.to_owned(),
            }),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate(code.to_owned())),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, code: &str) -> Result<Option<String>, StoreError> {
        let url: Option<String> =
            sqlx::query_scalar("SELECT original_url FROM urls WHERE short_code = ?1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;

        Ok(url)
    }

    async fn list(&self, limit: usize) -> Result<Vec<LinkMapping>, StoreError> {
        let links: Vec<LinkMapping> = sqlx::query_as(
            "SELECT id, short_code, original_url
             FROM urls
             ORDER BY id DESC
             LIMIT ?1",
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
