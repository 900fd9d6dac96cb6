//! FMP MCP Server Library
//!
//! This crate exposes the Financial Modeling Prep REST API as a Model
//! Context Protocol (MCP) server. Every tool issues one authenticated GET
//! against the upstream API and renders the JSON response as a markdown
//! report; resources and prompts build on the same gateway.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Shared infrastructure - configuration, error handling, the
//!   API request gateway, the main server, and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Market-data tools callable by clients
//!   - **resources**: Addressable reports (stock info, statements, peers)
//!   - **prompts**: Analysis prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use fmp_mcp_server::core::{Config, FmpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = FmpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{
    ApiResponse, Config, Error, ErrorEnvelope, ErrorKind, FmpClient, FmpServer, Result,
};
