//! Resource Registry - central registration of all resources.
//!
//! This module provides dynamic resource registration without modifying
//! service.rs. When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here
//! 4. Dispatch its scheme in `service.rs`

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};

use super::definitions::{
    FinancialStatementResource, MarketSnapshotResource, PriceTargetsResource, RatiosResource,
    ResourceDefinition, StockInfoResource, StockPeersResource,
};

/// Build an annotated resource template from a definition.
fn build_template<R: ResourceDefinition>() -> ResourceTemplate {
    RawResourceTemplate {
        uri_template: R::URI_TEMPLATE.to_string(),
        name: R::NAME.to_string(),
        title: None,
        description: Some(R::DESCRIPTION.to_string()),
        mime_type: Some(R::MIME_TYPE.to_string()),
    }
    .no_annotation()
}

/// Build a concrete resource from a definition with a fixed URI.
fn build_resource<R: ResourceDefinition>() -> Resource {
    let mut raw = RawResource::new(R::URI_TEMPLATE, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());
    raw.no_annotation()
}

/// Get all concrete (fixed-URI) resources.
pub fn get_all_resources() -> Vec<Resource> {
    vec![build_resource::<MarketSnapshotResource>()]
}

/// Get all registered resource templates.
///
/// Resource templates use URI templates (RFC 6570) to describe
/// parameterized resources that clients can fill in.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        build_template::<StockInfoResource>(),
        build_template::<FinancialStatementResource>(),
        build_template::<RatiosResource>(),
        build_template::<StockPeersResource>(),
        build_template::<PriceTargetsResource>(),
    ]
}

/// Get the list of all resource URI templates, fixed URIs included.
pub fn resource_uri_templates() -> Vec<&'static str> {
    vec![
        StockInfoResource::URI_TEMPLATE,
        MarketSnapshotResource::URI_TEMPLATE,
        FinancialStatementResource::URI_TEMPLATE,
        RatiosResource::URI_TEMPLATE,
        StockPeersResource::URI_TEMPLATE,
        PriceTargetsResource::URI_TEMPLATE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].raw.uri, "market-snapshot://current");
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 5);

        let uri_templates: Vec<_> = templates
            .iter()
            .map(|t| t.raw.uri_template.as_str())
            .collect();
        assert!(uri_templates.contains(&"stock-info://{symbol}"));
        assert!(
            uri_templates.contains(&"financial-statement://{symbol}/{statement_type}/{period}")
        );
        assert!(uri_templates.contains(&"ratios://{symbol}"));
        assert!(uri_templates.contains(&"stock-peers://{symbol}"));
        assert!(uri_templates.contains(&"price-targets://{symbol}"));
    }

    #[test]
    fn test_resource_uri_templates() {
        let uris = resource_uri_templates();
        assert_eq!(uris.len(), 6);
        assert!(uris.contains(&"market-snapshot://current"));
    }
}
