//! Financial ratios resource definition.
//!
//! `ratios://{symbol}` resolves to the financial ratios report.

use crate::core::api::FmpClient;
use crate::domains::tools::definitions::FinancialRatiosTool;

use super::ResourceDefinition;

/// Financial ratios addressed by symbol.
pub struct RatiosResource;

impl ResourceDefinition for RatiosResource {
    const URI_TEMPLATE: &'static str = "ratios://{symbol}";
    const NAME: &'static str = "Financial Ratios";
    const DESCRIPTION: &'static str =
        "Liquidity, profitability, debt, and valuation ratios for a symbol";
    const MIME_TYPE: &'static str = "text/markdown";
}

impl RatiosResource {
    /// Fetch and render the ratios for `symbol`.
    pub async fn read(client: &FmpClient, symbol: &str) -> String {
        let data = client.get("ratios", &[("symbol", symbol.to_string())]).await;
        FinancialRatiosTool::render(symbol, &data)
    }
}
