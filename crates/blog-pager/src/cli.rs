use std::path::PathBuf;

use clap::Parser;

use crate::core::types::PagerConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "blog-pager")]
pub struct Args {
    /// Run as MCP server (JSON-RPC 2.0 over stdio)
    #[arg(long)]
    pub mcp: bool,

    /// Logging level (stderr). Also supports RUST_LOG.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// SQLite file holding session and search state. In-memory when omitted.
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Number of page links shown at once. Must be odd.
    #[arg(long, default_value_t = 5)]
    pub page_length: u32,

    /// Items per page when the caller does not pick one.
    #[arg(long, default_value_t = 10)]
    pub default_limit: u32,

    /// Items-per-page choices offered by the limit selector.
    #[arg(long, value_delimiter = ',', default_value = "5,10,20,50,100")]
    pub limit_options: Vec<u32>,
}

impl Args {
    pub fn pager_config(&self) -> PagerConfig {
        PagerConfig {
            page_length: self.page_length,
            default_limit: self.default_limit,
            limit_options: self.limit_options.clone(),
        }
    }
}
