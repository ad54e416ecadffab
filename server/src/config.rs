use std::str::FromStr;

use anyhow::{Context, Result};

/// Upper bound for `?limit=` on `GET /list`.
pub const MAX_LIST_LIMIT: usize = 1000;

/// Where link mappings live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// SQLite file at `DATABASE_URL`; survives restarts.
    Sqlite,
    /// Process memory only; everything is lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("unknown storage backend '{other}' (expected sqlite or memory)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind the HTTP server to, e.g. "0.0.0.0"
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public base URL used when generating short links, e.g. "https://go.example.com"
    /// Never has a trailing slash.
    pub base_url: String,

    pub storage: StorageBackend,

    /// SQLite connection string, e.g. "sqlite:./data.db". Ignored by the memory backend.
    pub database_url: String,

    /// Length of generated short codes.
    pub code_length: usize,

    /// How many codes to try per create before giving up on collisions.
    /// 1 means a collision fails the request outright.
    pub code_max_attempts: u32,

    /// Default bound for `GET /list` when no `?limit=` is given.
    pub list_limit: usize,
}

impl AppConfig {
    /// Load configuration from environment variables (populated by dotenvy before this is called).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = var("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse::<u16>()
            .context("PORT must be a valid port number (1–65535)")?;
        if port == 0 {
            anyhow::bail!("PORT must be a valid port number (1–65535)");
        }

        let base_url = var("BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();

        let storage = var("STORAGE")
            .unwrap_or_else(|| "sqlite".into())
            .parse::<StorageBackend>()?;

        let code_length = bounded(&var, "CODE_LENGTH", 6, 1..=64)?;
        let code_max_attempts = bounded(&var, "CODE_MAX_ATTEMPTS", 1, 1..=16)?;
        let list_limit = bounded(&var, "LIST_LIMIT", 10, 1..=MAX_LIST_LIMIT)?;

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            base_url,
            storage,
            database_url: var("DATABASE_URL").unwrap_or_else(|| "sqlite:./data.db".into()),
            code_length,
            code_max_attempts,
            list_limit,
        })
    }

    /// The public URL for a short code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

fn bounded<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    range: std::ops::RangeInclusive<T>,
) -> Result<T>
where
    T: FromStr + PartialOrd + std::fmt::Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a number"))?,
        None => default,
    };

    if !range.contains(&value) {
        anyhow::bail!(
            "{key} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        );
    }
    Ok(value)
}
