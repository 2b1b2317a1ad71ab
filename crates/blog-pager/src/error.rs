use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::Control;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid paging descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("control not visible: {0:?}")]
    ControlHidden(Control),

    #[error("limit not offered: {0}")]
    LimitNotOffered(u32),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("failed to open store: {path}: {source}")]
    StoreOpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("store error: {0}")]
    Store(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Store(e.to_string())
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::InvalidDescriptor(_) => "INVALID_DESCRIPTOR",
            AppError::ControlHidden(_) => "CONTROL_HIDDEN",
            AppError::LimitNotOffered(_) => "LIMIT_NOT_OFFERED",
            AppError::NotLoggedIn => "NOT_LOGGED_IN",
            AppError::StoreOpenFailed { .. } => "STORE_OPEN_FAILED",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
