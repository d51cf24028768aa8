//! Store configuration
//!
//! Defaults match the public JSONPlaceholder service. Every value can be
//! overridden from the environment (a `.env` file is honoured):
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `API_URL` | Remote service base URL | `https://jsonplaceholder.typicode.com` |
//! | `POSTLIST_PAGE_SIZE` | Posts per page | `10` |
//! | `POSTLIST_TIMEOUT_MS` | Remote call timeout | `10000` |
//! | `POSTLIST_CACHE` | `memory`, `file` or `sqlite` | `file` |
//! | `POSTLIST_CACHE_PATH` | Cache directory or database file | `.postlist` |
//!
//! With `sqlite`, the default database is `.postlist/cache.db`.

use postlist_core::DEFAULT_PAGE_SIZE;
use postlist_store::errors::io_error;
use postlist_store::{FsKvStore, LocalCache, MemoryKvStore, SqliteKvStore};
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{config_error, Result};

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CACHE_DIR: &str = ".postlist";
pub const DEFAULT_SQLITE_FILE: &str = "cache.db";

pub const ENV_API_URL: &str = "API_URL";
pub const ENV_PAGE_SIZE: &str = "POSTLIST_PAGE_SIZE";
pub const ENV_TIMEOUT_MS: &str = "POSTLIST_TIMEOUT_MS";
pub const ENV_CACHE: &str = "POSTLIST_CACHE";
pub const ENV_CACHE_PATH: &str = "POSTLIST_CACHE_PATH";

/// Where the Local Cache keeps its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheConfig {
    /// Process-local, lost on exit
    Memory,
    /// One JSON file per key under `dir`
    File { dir: PathBuf },
    /// SQLite database at `path`
    Sqlite { path: PathBuf },
}

impl CacheConfig {
    /// Open the configured backend wrapped in a `LocalCache`
    ///
    /// # Errors
    ///
    /// Directory creation or database open failures.
    pub fn open(&self) -> Result<LocalCache> {
        match self {
            CacheConfig::Memory => Ok(LocalCache::new(MemoryKvStore::new())),
            CacheConfig::File { dir } => Ok(LocalCache::new(FsKvStore::new(dir.clone()))),
            CacheConfig::Sqlite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| io_error("create_cache_dir", e))?;
                }
                Ok(LocalCache::new(SqliteKvStore::open(path)?))
            }
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig::File {
            dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

/// Post Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub api_url: String,
    pub page_size: usize,
    pub request_timeout: Duration,
    pub cache: CacheConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache: CacheConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Read configuration from the process environment, after loading `.env`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for values that do not parse.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for values that do not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            config.page_size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    config_error(ENV_PAGE_SIZE, format!("not a positive integer: {}", raw))
                })?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| {
                    config_error(ENV_TIMEOUT_MS, format!("not a positive integer: {}", raw))
                })?;
            config.request_timeout = Duration::from_millis(millis);
        }

        let cache_path = lookup(ENV_CACHE_PATH).map(PathBuf::from);
        config.cache = match lookup(ENV_CACHE).as_deref().map(str::trim) {
            None | Some("file") => CacheConfig::File {
                dir: cache_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            },
            Some("sqlite") => CacheConfig::Sqlite {
                path: cache_path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR).join(DEFAULT_SQLITE_FILE)),
            },
            Some("memory") => CacheConfig::Memory,
            Some(other) => {
                return Err(config_error(
                    ENV_CACHE,
                    format!("expected memory, file or sqlite, got {}", other),
                ))
            }
        };

        Ok(config)
    }
}
