//! Key-value persistence for state that outlives a single render
//! (session, last search). Stores are injected, never ambient.

pub mod memory;
pub mod search;
pub mod session;
pub mod sqlite;

use std::{path::Path, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::AppResult;

pub use memory::MemoryStore;
pub use search::SearchStore;
pub use session::{Session, SessionStore};
pub use sqlite::SqliteStore;

pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

pub fn get_typed<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> AppResult<Option<T>> {
    match store.get(key)? {
        Some(v) => Ok(Some(serde_json::from_value(v)?)),
        None => Ok(None),
    }
}

pub fn set_typed<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> AppResult<()> {
    store.set(key, serde_json::to_value(value)?)
}

/// SQLite-backed store when a path is given, in-memory otherwise.
pub fn open(path: Option<&Path>) -> AppResult<Arc<dyn KvStore>> {
    match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "using sqlite store");
            Ok(Arc::new(SqliteStore::open(p)?))
        }
        None => {
            tracing::info!("using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
