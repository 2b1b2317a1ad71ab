use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use serde_json::Value;

use super::KvStore;
use crate::error::{AppError, AppResult};

const BUSY_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        let path = absolute_lossy(path)?;
        let conn = open_conn(&path, BUSY_TIMEOUT_MS)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Internal("poisoned lock".into()))
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let conn = self.lock()?;
        let raw: Option<String> = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |r| r.get(0))
            .optional()?;
        match raw {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let text = serde_json::to_string(&value)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, text.as_str()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}

fn open_conn(path: &Path, busy_timeout_ms: u64) -> AppResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
    let conn = Connection::open_with_flags(path, flags).map_err(|source| {
        tracing::error!(error = %source, path = %path.display(), "failed to open store");
        AppError::StoreOpenFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    conn.busy_timeout(std::time::Duration::from_millis(busy_timeout_ms))?;
    Ok(conn)
}

fn absolute_lossy(path: &Path) -> AppResult<PathBuf> {
    // canonicalize needs the file to exist; the store may be created on open.
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
