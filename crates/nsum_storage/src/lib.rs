#[cfg(feature = "sqlite")]
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use nsum_core::{ArticleStore, Error, Result};
use tracing::info;

pub mod backends;

pub use backends::*;

/// Which store backs the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    Memory,
    #[default]
    Sqlite,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Memory => f.write_str("memory"),
            StorageKind::Sqlite => f.write_str("sqlite"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageKind::Memory),
            "sqlite" => Ok(StorageKind::Sqlite),
            other => Err(Error::Config(format!(
                "Unknown storage backend '{}'. Available backends: memory, sqlite",
                other
            ))),
        }
    }
}

/// Opens the article store. `location` is the database path for SQLite and
/// is ignored by the memory store.
pub async fn create_storage(kind: StorageKind, location: Option<&str>) -> Result<Arc<dyn ArticleStore>> {
    match kind {
        StorageKind::Memory => {
            info!("Using in-memory article cache");
            Ok(Arc::new(MemoryStorage::new()))
        }
        #[cfg(feature = "sqlite")]
        StorageKind::Sqlite => {
            let path = location.unwrap_or(sqlite::DEFAULT_DB_PATH);
            info!("Using SQLite article cache at {}", path);
            Ok(Arc::new(SQLiteStorage::new_with_path(Path::new(path)).await?))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageKind::Sqlite => {
            let _ = location;
            Err(Error::Config(
                "SQLite support is not enabled. Rebuild with the 'sqlite' feature".to_string(),
            ))
        }
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageKind};
}
