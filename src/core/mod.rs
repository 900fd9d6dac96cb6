//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the upstream API gateway, server
//! lifecycle management, and transport layer abstractions.

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use api::{ApiResponse, ErrorEnvelope, ErrorKind, FmpClient};
pub use config::Config;
pub use error::{Error, Result};
pub use server::FmpServer;
pub use transport::{TransportConfig, TransportService};
