//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. It lists the
//! registered resources and templates, matches incoming URIs against the
//! known schemes, and resolves them through the gateway.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use tracing::info;

use std::sync::Arc;

use super::definitions::{
    FinancialStatementResource, MarketSnapshotResource, PriceTargetsResource, RatiosResource,
    StockInfoResource, StockPeersResource,
};
use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::core::api::FmpClient;

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Shared gateway client used to resolve resource content.
    client: Arc<FmpClient>,

    /// Concrete resources with fixed URIs.
    resources: Vec<Resource>,

    /// Resource templates for parameterized resources.
    templates: Vec<ResourceTemplate>,
}

impl ResourceService {
    /// Create a new ResourceService against the shared gateway client.
    pub fn new(client: Arc<FmpClient>) -> Self {
        info!("Initializing ResourceService");

        Self {
            client,
            resources: get_all_resources(),
            templates: get_all_resource_templates(),
        }
    }

    /// List all concrete resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources.clone()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    ///
    /// The scheme selects the resource definition; the path carries its
    /// parameters. Upstream failures are rendered into the report text, so
    /// the only errors here are unknown or malformed URIs.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let (scheme, path) = uri
            .split_once("://")
            .ok_or_else(|| ResourceError::invalid_uri(uri))?;

        let markdown = match scheme {
            "stock-info" => {
                let symbol = single_segment(uri, path)?;
                StockInfoResource::read(&self.client, symbol).await
            }
            "market-snapshot" => {
                if path != "current" {
                    return Err(ResourceError::not_found(uri));
                }
                MarketSnapshotResource::read(&self.client).await
            }
            "financial-statement" => {
                let mut segments = path.split('/');
                match (segments.next(), segments.next(), segments.next(), segments.next()) {
                    (Some(symbol), Some(statement_type), Some(period), None)
                        if !symbol.is_empty() =>
                    {
                        FinancialStatementResource::read(
                            &self.client,
                            symbol,
                            statement_type,
                            period,
                        )
                        .await?
                    }
                    _ => return Err(ResourceError::invalid_uri(uri)),
                }
            }
            "ratios" => {
                let symbol = single_segment(uri, path)?;
                RatiosResource::read(&self.client, symbol).await
            }
            "stock-peers" => {
                let symbol = single_segment(uri, path)?;
                StockPeersResource::read(&self.client, symbol).await
            }
            "price-targets" => {
                let symbol = single_segment(uri, path)?;
                PriceTargetsResource::read(&self.client, symbol).await
            }
            _ => return Err(ResourceError::not_found(uri)),
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(markdown, uri)],
        })
    }
}

/// Require the path to be exactly one non-empty segment (the symbol).
fn single_segment<'a>(uri: &str, path: &'a str) -> Result<&'a str, ResourceError> {
    if path.is_empty() || path.contains('/') {
        Err(ResourceError::invalid_uri(uri))
    } else {
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;

    fn test_service() -> ResourceService {
        let client = Arc::new(FmpClient::new(&ApiConfig::default()).unwrap());
        ResourceService::new(client)
    }

    #[tokio::test]
    async fn test_list_resources() {
        let service = test_service();
        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 1);
    }

    #[tokio::test]
    async fn test_list_resource_templates() {
        let service = test_service();
        let templates = service.list_resource_templates().await;
        assert_eq!(templates.len(), 5);
    }

    #[tokio::test]
    async fn test_read_unknown_scheme() {
        let service = test_service();
        let result = service.read_resource("bogus://AAPL").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_read_missing_separator() {
        let service = test_service();
        let result = service.read_resource("stock-info:AAPL").await;
        assert!(matches!(result, Err(ResourceError::InvalidUri(_))));
    }

    #[tokio::test]
    async fn test_read_empty_symbol() {
        let service = test_service();
        let result = service.read_resource("stock-info://").await;
        assert!(matches!(result, Err(ResourceError::InvalidUri(_))));
    }

    #[tokio::test]
    async fn test_read_malformed_statement_path() {
        let service = test_service();
        let result = service.read_resource("financial-statement://AAPL/income").await;
        assert!(matches!(result, Err(ResourceError::InvalidUri(_))));
    }

    #[tokio::test]
    async fn test_read_snapshot_requires_current() {
        let service = test_service();
        let result = service.read_resource("market-snapshot://yesterday").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_single_segment() {
        assert!(single_segment("u", "AAPL").is_ok());
        assert!(single_segment("u", "").is_err());
        assert!(single_segment("u", "AAPL/extra").is_err());
    }
}
