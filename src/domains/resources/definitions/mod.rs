//! Resource definitions module.
//!
//! Each resource is defined in its own file with:
//! - URI template and metadata
//! - An async `read` function that resolves it through the gateway
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait and a `read` function
//! 3. Export it here
//! 4. Register it in `registry.rs` and dispatch it in `service.rs`

pub mod financial_statement;
pub mod market_snapshot;
pub mod price_targets;
pub mod ratios;
pub mod stock_info;
pub mod stock_peers;

pub use financial_statement::FinancialStatementResource;
pub use market_snapshot::MarketSnapshotResource;
pub use price_targets::PriceTargetsResource;
pub use ratios::RatiosResource;
pub use stock_info::StockInfoResource;
pub use stock_peers::StockPeersResource;

/// Trait for resource definitions.
///
/// Each resource must implement this trait to provide its metadata. The
/// URI template uses RFC 6570 `{placeholder}` syntax; fully-fixed URIs are
/// also valid templates.
pub trait ResourceDefinition {
    /// The URI template of the resource.
    const URI_TEMPLATE: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;
}
