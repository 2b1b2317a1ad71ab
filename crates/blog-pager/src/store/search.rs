use std::sync::Arc;

use super::{get_typed, set_typed, KvStore};
use crate::{core::search::SearchState, error::AppResult};

pub const SEARCH_KEY: &str = "search";

/// Remembers the last search so the listing reopens where the user left it.
#[derive(Clone)]
pub struct SearchStore {
    store: Arc<dyn KvStore>,
}

impl SearchStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> AppResult<SearchState> {
        Ok(get_typed(self.store.as_ref(), SEARCH_KEY)?.unwrap_or_default())
    }

    pub fn save(&self, state: &SearchState) -> AppResult<()> {
        state.validate()?;
        set_typed(self.store.as_ref(), SEARCH_KEY, state)
    }

    pub fn reset(&self) -> AppResult<()> {
        self.store.remove(SEARCH_KEY)
    }
}
