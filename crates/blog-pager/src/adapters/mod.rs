pub mod bridge;
pub mod mcp;
