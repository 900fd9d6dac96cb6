//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Every tool follows the same shape: typed parameters, one gateway call,
//! and a pure markdown rendering of the response.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, one file per API section
//! - `router.rs` - ToolRouter builder for the STDIO transport
//! - `registry.rs` - Central tool registry and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add the tool to the matching file in `definitions/` (or a new one)
//! 2. Define params, `execute()`, and `render()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add a route in `router.rs` using `with_route()`
//! 5. Register in `registry.rs` for listing and HTTP support

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
