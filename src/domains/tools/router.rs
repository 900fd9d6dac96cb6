//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for the STDIO transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own
//! route against the shared gateway client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

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

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<FmpClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(QuoteTool::create_route(client.clone()))
        .with_route(QuoteShortTool::create_route(client.clone()))
        .with_route(PriceChangeTool::create_route(client.clone()))
        .with_route(CompanyProfileTool::create_route(client.clone()))
        .with_route(CompanyNotesTool::create_route(client.clone()))
        .with_route(IncomeStatementTool::create_route(client.clone()))
        .with_route(BalanceSheetTool::create_route(client.clone()))
        .with_route(CashFlowTool::create_route(client.clone()))
        .with_route(FinancialRatiosTool::create_route(client.clone()))
        .with_route(KeyMetricsTool::create_route(client.clone()))
        .with_route(RatingsSnapshotTool::create_route(client.clone()))
        .with_route(PriceTargetNewsTool::create_route(client.clone()))
        .with_route(CompanyDividendsTool::create_route(client.clone()))
        .with_route(DividendsCalendarTool::create_route(client.clone()))
        .with_route(MarketHoursTool::create_route(client.clone()))
        .with_route(MarketHolidaysTool::create_route(client.clone()))
        .with_route(MostActiveTool::create_route(client.clone()))
        .with_route(BiggestGainersTool::create_route(client.clone()))
        .with_route(BiggestLosersTool::create_route(client.clone()))
        .with_route(SearchSymbolTool::create_route(client.clone()))
        .with_route(HistoricalPriceTool::create_route(client.clone()))
        .with_route(EmaTool::create_route(client.clone()))
        .with_route(ForexListTool::create_route(client.clone()))
        .with_route(ForexQuoteTool::create_route(client.clone()))
        .with_route(IndexListTool::create_route(client.clone()))
        .with_route(IndexQuoteTool::create_route(client.clone()))
        .with_route(CommoditiesListTool::create_route(client.clone()))
        .with_route(CommoditiesPricesTool::create_route(client.clone()))
        .with_route(CryptoListTool::create_route(client.clone()))
        .with_route(CryptoQuoteTool::create_route(client))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::core::config::ApiConfig;

    struct TestServer {}

    fn test_client() -> Arc<FmpClient> {
        Arc::new(FmpClient::new(&ApiConfig::default()).unwrap())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        let tools = router.list_all();
        assert_eq!(tools.len(), 30);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get_quote"));
        assert!(names.contains(&"get_company_profile"));
        assert!(names.contains(&"get_income_statement"));
        assert!(names.contains(&"get_market_hours"));
        assert!(names.contains(&"get_most_active"));
        assert!(names.contains(&"search_by_symbol"));
        assert!(names.contains(&"get_forex_list"));
        assert!(names.contains(&"get_crypto_quote"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let client = test_client();
        let registry = ToolRegistry::new(client.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(client);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_every_tool_has_description() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        for tool in router.list_all() {
            assert!(
                tool.description.as_deref().is_some_and(|d| !d.is_empty()),
                "tool {} has no description",
                tool.name
            );
        }
    }
}
