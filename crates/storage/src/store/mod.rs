#![forbid(unsafe_code)]

mod attach;
mod config;
mod content;
mod error;
mod keywords;
mod support;
mod tree;
mod types;

pub use config::StoreConfig;
pub use error::StoreError;
pub use types::*;

use rusqlite::{Connection, OptionalExtension, params};
use sl_core::ids::{DefId, NodeId, PointId, RowId};
use sl_core::keywords::{RelationName, ValueType};
use sl_core::model::{DefKind, NodeKind};
use std::path::{Path, PathBuf};
use support::*;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with_config(StoreConfig::new(storage_dir))
    }

    pub fn open_with_config(config: StoreConfig) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&config.storage_dir)?;

        let db_path = config.db_path();
        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(config.busy_timeout())?;

        let store = Self::bootstrap(conn, Some(db_path))?;
        tracing::info!(path = ?store.db_path, "story store opened");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self::bootstrap(conn, None)?;
        tracing::debug!("in-memory story store opened");
        Ok(store)
    }

    fn bootstrap(conn: Connection, db_path: Option<PathBuf>) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrate_sqlite_schema(&conn)?;
        Ok(Self { conn, db_path })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Runs `op` with referential-integrity enforcement switched off.
    ///
    /// SQLite ignores `PRAGMA foreign_keys` inside an open transaction, so the switch
    /// happens here, around whatever transaction `op` opens. Enforcement is restored
    /// even when `op` fails.
    fn with_foreign_keys_suspended<T>(
        &mut self,
        op: impl FnOnce(&mut Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        self.conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
        let result = op(&mut self.conn);
        let restored = self.conn.execute_batch("PRAGMA foreign_keys = ON;");
        let value = result?;
        restored?;
        Ok(value)
    }
}

fn to_sqlite_i64(value: usize) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}

fn to_index(value: i64) -> Result<usize, StoreError> {
    usize::try_from(value).map_err(|_| StoreError::InvalidInput("negative order index"))
}

fn normalize_name(value: &str, what: &'static str) -> Result<String, StoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StoreError::InvalidInput(what));
    }
    Ok(value.to_string())
}
