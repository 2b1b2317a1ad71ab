use std::{collections::HashMap, sync::Mutex};

use serde_json::Value;

use super::KvStore;
use crate::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let guard = self.inner.lock().map_err(|_| AppError::Internal("poisoned lock".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let mut guard = self.inner.lock().map_err(|_| AppError::Internal("poisoned lock".into()))?;
        guard.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut guard = self.inner.lock().map_err(|_| AppError::Internal("poisoned lock".into()))?;
        guard.remove(key);
        Ok(())
    }
}
