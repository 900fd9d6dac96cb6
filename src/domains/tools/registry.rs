//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools, built once at startup
//! - HTTP dispatch for tool calls (when the http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::Tool;

use crate::core::api::FmpClient;

use super::definitions::{
    BalanceSheetTool, BiggestGainersTool, BiggestLosersTool, CashFlowTool, CommoditiesListTool,
    CommoditiesPricesTool, CompanyDividendsTool, CompanyNotesTool, CompanyProfileTool,
    CryptoListTool, CryptoQuoteTool, DividendsCalendarTool, EmaTool, FinancialRatiosTool,
    ForexListTool, ForexQuoteTool, HistoricalPriceTool, IncomeStatementTool, IndexListTool,
    IndexQuoteTool, KeyMetricsTool, MarketHolidaysTool, MarketHoursTool, MostActiveTool,
    PriceChangeTool, PriceTargetNewsTool, QuoteShortTool, QuoteTool, RatingsSnapshotTool,
    SearchSymbolTool,
};

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when the http feature is enabled)
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    client: Arc<FmpClient>,
}

impl ToolRegistry {
    /// Create a new tool registry against the shared gateway client.
    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            QuoteTool::NAME,
            QuoteShortTool::NAME,
            PriceChangeTool::NAME,
            CompanyProfileTool::NAME,
            CompanyNotesTool::NAME,
            IncomeStatementTool::NAME,
            BalanceSheetTool::NAME,
            CashFlowTool::NAME,
            FinancialRatiosTool::NAME,
            KeyMetricsTool::NAME,
            RatingsSnapshotTool::NAME,
            PriceTargetNewsTool::NAME,
            CompanyDividendsTool::NAME,
            DividendsCalendarTool::NAME,
            MarketHoursTool::NAME,
            MarketHolidaysTool::NAME,
            MostActiveTool::NAME,
            BiggestGainersTool::NAME,
            BiggestLosersTool::NAME,
            SearchSymbolTool::NAME,
            HistoricalPriceTool::NAME,
            EmaTool::NAME,
            ForexListTool::NAME,
            ForexQuoteTool::NAME,
            IndexListTool::NAME,
            IndexQuoteTool::NAME,
            CommoditiesListTool::NAME,
            CommoditiesPricesTool::NAME,
            CryptoListTool::NAME,
            CryptoQuoteTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for tool metadata; both the
    /// STDIO router and the HTTP transport list from here.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            QuoteTool::to_tool(),
            QuoteShortTool::to_tool(),
            PriceChangeTool::to_tool(),
            CompanyProfileTool::to_tool(),
            CompanyNotesTool::to_tool(),
            IncomeStatementTool::to_tool(),
            BalanceSheetTool::to_tool(),
            CashFlowTool::to_tool(),
            FinancialRatiosTool::to_tool(),
            KeyMetricsTool::to_tool(),
            RatingsSnapshotTool::to_tool(),
            PriceTargetNewsTool::to_tool(),
            CompanyDividendsTool::to_tool(),
            DividendsCalendarTool::to_tool(),
            MarketHoursTool::to_tool(),
            MarketHolidaysTool::to_tool(),
            MostActiveTool::to_tool(),
            BiggestGainersTool::to_tool(),
            BiggestLosersTool::to_tool(),
            SearchSymbolTool::to_tool(),
            HistoricalPriceTool::to_tool(),
            EmaTool::to_tool(),
            ForexListTool::to_tool(),
            ForexQuoteTool::to_tool(),
            IndexListTool::to_tool(),
            IndexQuoteTool::to_tool(),
            CommoditiesListTool::to_tool(),
            CommoditiesPricesTool::to_tool(),
            CryptoListTool::to_tool(),
            CryptoQuoteTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools. The returned value
    /// mirrors the MCP `tools/call` result shape.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        use tracing::warn;

        let client = &self.client;
        let report = match name {
            QuoteTool::NAME => QuoteTool::execute(client, &parse(arguments)?).await,
            QuoteShortTool::NAME => QuoteShortTool::execute(client, &parse(arguments)?).await,
            PriceChangeTool::NAME => PriceChangeTool::execute(client, &parse(arguments)?).await,
            CompanyProfileTool::NAME => {
                CompanyProfileTool::execute(client, &parse(arguments)?).await
            }
            CompanyNotesTool::NAME => CompanyNotesTool::execute(client, &parse(arguments)?).await,
            IncomeStatementTool::NAME => {
                IncomeStatementTool::execute(client, &parse(arguments)?).await
            }
            BalanceSheetTool::NAME => BalanceSheetTool::execute(client, &parse(arguments)?).await,
            CashFlowTool::NAME => CashFlowTool::execute(client, &parse(arguments)?).await,
            FinancialRatiosTool::NAME => {
                FinancialRatiosTool::execute(client, &parse(arguments)?).await
            }
            KeyMetricsTool::NAME => KeyMetricsTool::execute(client, &parse(arguments)?).await,
            RatingsSnapshotTool::NAME => {
                RatingsSnapshotTool::execute(client, &parse(arguments)?).await
            }
            PriceTargetNewsTool::NAME => {
                PriceTargetNewsTool::execute(client, &parse(arguments)?).await
            }
            CompanyDividendsTool::NAME => {
                CompanyDividendsTool::execute(client, &parse(arguments)?).await
            }
            DividendsCalendarTool::NAME => {
                DividendsCalendarTool::execute(client, &parse(arguments)?).await
            }
            MarketHoursTool::NAME => MarketHoursTool::execute(client, &parse(arguments)?).await,
            MarketHolidaysTool::NAME => {
                MarketHolidaysTool::execute(client, &parse(arguments)?).await
            }
            MostActiveTool::NAME => MostActiveTool::execute(client, &parse(arguments)?).await,
            BiggestGainersTool::NAME => {
                BiggestGainersTool::execute(client, &parse(arguments)?).await
            }
            BiggestLosersTool::NAME => {
                BiggestLosersTool::execute(client, &parse(arguments)?).await
            }
            SearchSymbolTool::NAME => SearchSymbolTool::execute(client, &parse(arguments)?).await,
            HistoricalPriceTool::NAME => {
                HistoricalPriceTool::execute(client, &parse(arguments)?).await
            }
            EmaTool::NAME => EmaTool::execute(client, &parse(arguments)?).await,
            ForexListTool::NAME => ForexListTool::execute(client).await,
            ForexQuoteTool::NAME => ForexQuoteTool::execute(client, &parse(arguments)?).await,
            IndexListTool::NAME => IndexListTool::execute(client).await,
            IndexQuoteTool::NAME => IndexQuoteTool::execute(client, &parse(arguments)?).await,
            CommoditiesListTool::NAME => CommoditiesListTool::execute(client).await,
            CommoditiesPricesTool::NAME => {
                CommoditiesPricesTool::execute(client, &parse(arguments)?).await
            }
            CryptoListTool::NAME => CryptoListTool::execute(client).await,
            CryptoQuoteTool::NAME => CryptoQuoteTool::execute(client, &parse(arguments)?).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(format!("Unknown tool: {name}"));
            }
        };

        Ok(serde_json::json!({
            "content": [{"type": "text", "text": report}],
            "isError": false
        }))
    }
}

/// Parse HTTP tool-call arguments into the tool's typed params.
#[cfg(feature = "http")]
fn parse<P: serde::de::DeserializeOwned>(arguments: serde_json::Value) -> Result<P, String> {
    serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;

    fn test_client() -> Arc<FmpClient> {
        Arc::new(FmpClient::new(&ApiConfig::default()).unwrap())
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_client());
        let names = registry.tool_names();
        assert_eq!(names.len(), 30);
        assert!(names.contains(&"get_quote"));
        assert!(names.contains(&"get_quote_short"));
        assert!(names.contains(&"get_company_profile"));
        assert!(names.contains(&"get_balance_sheet"));
        assert!(names.contains(&"get_dividends_calendar"));
        assert!(names.contains(&"get_market_holidays"));
        assert!(names.contains(&"get_biggest_losers"));
        assert!(names.contains(&"get_historical_price_eod_light"));
        assert!(names.contains(&"get_ema"));
        assert!(names.contains(&"get_commodities_prices"));
    }

    #[test]
    fn test_metadata_matches_names() {
        let registry = ToolRegistry::new(test_client());
        let names = registry.tool_names();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(names.len(), tools.len());
        for tool in tools {
            assert!(names.contains(&tool.name.as_ref()));
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_client());
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert!(result.is_err());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_rejects_bad_arguments() {
        let registry = ToolRegistry::new(test_client());
        let result = registry.call_tool("get_quote", serde_json::json!({})).await;
        assert!(result.is_err());
    }
}
