use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use super::{get_typed, search::SEARCH_KEY, set_typed, KvStore};
use crate::error::{AppError, AppResult};

pub const SESSION_KEY: &str = "session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub token: String,
    pub logged_in_at: u64,
}

/// Login state. Set on login, cleared on logout.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KvStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn login(&self, username: &str, token: &str) -> AppResult<Session> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::InvalidRequest("username is required".into()));
        }
        if token.is_empty() {
            return Err(AppError::InvalidRequest("token is required".into()));
        }
        let session = Session {
            username: username.to_string(),
            token: token.to_string(),
            logged_in_at: now_unix_secs(),
        };
        set_typed(self.store.as_ref(), SESSION_KEY, &session)?;
        tracing::info!(username = %session.username, "logged in");
        Ok(session)
    }

    pub fn current(&self) -> AppResult<Option<Session>> {
        get_typed(self.store.as_ref(), SESSION_KEY)
    }

    /// Guard for pages that need a logged-in user.
    pub fn require(&self) -> AppResult<Session> {
        self.current()?.ok_or(AppError::NotLoggedIn)
    }

    /// Drop the session along with the remembered search.
    pub fn logout(&self) -> AppResult<()> {
        if let Some(s) = self.current()? {
            tracing::info!(username = %s.username, "logged out");
        }
        self.store.remove(SESSION_KEY)?;
        self.store.remove(SEARCH_KEY)
    }
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::search::SearchState,
        store::{MemoryStore, SearchStore},
    };

    fn stores() -> (SessionStore, SearchStore) {
        let kv: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        (SessionStore::new(kv.clone()), SearchStore::new(kv))
    }

    #[test]
    fn login_then_current() {
        let (sessions, _) = stores();
        assert!(sessions.current().unwrap().is_none());
        let s = sessions.login("  ada ", "tok-1").unwrap();
        assert_eq!(s.username, "ada");
        assert_eq!(sessions.require().unwrap(), s);
    }

    #[test]
    fn login_requires_credentials() {
        let (sessions, _) = stores();
        assert_eq!(sessions.login("", "t").unwrap_err().code(), "INVALID_REQUEST");
        assert_eq!(sessions.login("ada", "").unwrap_err().code(), "INVALID_REQUEST");
        assert!(sessions.current().unwrap().is_none());
    }

    #[test]
    fn logout_clears_session_and_search() {
        let (sessions, searches) = stores();
        sessions.login("ada", "tok").unwrap();
        let state = SearchState {
            query: Some("rust".into()),
            page: 3,
            limit: 20,
        };
        searches.save(&state).unwrap();

        sessions.logout().unwrap();
        assert_eq!(sessions.require().unwrap_err().code(), "NOT_LOGGED_IN");
        assert_eq!(searches.load().unwrap(), SearchState::default());
    }
}
