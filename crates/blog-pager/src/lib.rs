//! Headless pager for the blog's post listing: page-window math, search
//! state, and session persistence behind stdio adapters.

pub mod adapters;
pub mod cli;
pub mod core;
pub mod error;
pub mod logging;
pub mod store;
