//! Symbol search tool.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::api::{ApiResponse, FmpClient};

use super::common::{self, default_limit, text_or, validate_limit};

/// Parameters for the symbol search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Ticker symbol or company name fragment to search for.
    #[schemars(description = "Ticker symbol or company name fragment (e.g., AAPL, Apple)")]
    pub query: String,

    /// Maximum number of results to return.
    #[schemars(description = "Maximum number of results (default: 10, max: 100)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Ticker symbol search tool.
#[derive(Debug, Clone)]
pub struct SearchSymbolTool;

impl SearchSymbolTool {
    pub const NAME: &'static str = "search_by_symbol";

    pub const DESCRIPTION: &'static str =
        "Search for listed securities by ticker symbol, returning name, \
         exchange, and currency for each match.";

    pub async fn execute(client: &FmpClient, params: &SearchParams) -> String {
        let limit = validate_limit(params.limit);
        info!(query = %params.query, limit, "searching symbols");
        let data = client
            .get(
                "search-symbol",
                &[
                    ("query", params.query.clone()),
                    ("limit", limit.to_string()),
                ],
            )
            .await;
        Self::render(&params.query, limit, &data)
    }

    pub fn render(query: &str, limit: usize, data: &ApiResponse) -> String {
        let matches = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching symbol search results for '{query}': {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No symbols found matching '{query}'"),
            },
        };

        let mut lines = vec![format!("# Symbol Search Results for '{query}'")];

        for result in matches.iter().take(limit) {
            lines.push(String::new());
            lines.push(format!(
                "## {} ({})",
                text_or(result, "name", "Unknown"),
                text_or(result, "symbol", "N/A")
            ));
            lines.push(format!(
                "**Exchange**: {}",
                text_or(result, "exchangeFullName", text_or(result, "exchange", "N/A"))
            ));
            lines.push(format!(
                "**Currency**: {}",
                text_or(result, "currency", "N/A")
            ));
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(client: Arc<FmpClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        common::markdown_route(Self::to_tool(), client, |client, params: SearchParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_search_render() {
        let data = ApiResponse::Payload(json!([
            {
                "symbol": "AAPL",
                "name": "Apple Inc.",
                "currency": "USD",
                "exchangeFullName": "NASDAQ Global Select",
                "exchange": "NASDAQ"
            },
            {
                "symbol": "APLE",
                "name": "Apple Hospitality REIT, Inc.",
                "currency": "USD",
                "exchange": "NYSE"
            }
        ]));
        let report = SearchSymbolTool::render("AAPL", 10, &data);
        assert!(report.contains("# Symbol Search Results for 'AAPL'"));
        assert!(report.contains("## Apple Inc. (AAPL)"));
        assert!(report.contains("**Exchange**: NASDAQ Global Select"));
        assert!(report.contains("**Exchange**: NYSE"));
        assert!(report.contains("**Currency**: USD"));
    }

    #[test]
    fn test_search_respects_limit() {
        let data = ApiResponse::Payload(json!([
            {"symbol": "A", "name": "Alpha"},
            {"symbol": "B", "name": "Beta"},
            {"symbol": "C", "name": "Gamma"}
        ]));
        let report = SearchSymbolTool::render("X", 2, &data);
        assert!(report.contains("## Alpha (A)"));
        assert!(report.contains("## Beta (B)"));
        assert!(!report.contains("## Gamma (C)"));
    }

    #[test]
    fn test_search_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::Timeout, "deadline exceeded");
        assert_eq!(
            SearchSymbolTool::render("AAPL", 10, &error),
            "Error fetching symbol search results for 'AAPL': deadline exceeded"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            SearchSymbolTool::render("ZZZZZ", 10, &empty),
            "No symbols found matching 'ZZZZZ'"
        );
    }
}
