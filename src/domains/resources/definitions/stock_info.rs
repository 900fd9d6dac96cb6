//! Stock info resource definition.
//!
//! `stock-info://{symbol}` resolves to the company profile report.

use crate::core::api::FmpClient;
use crate::domains::tools::definitions::CompanyProfileTool;

use super::ResourceDefinition;

/// Company overview addressed by symbol.
pub struct StockInfoResource;

impl ResourceDefinition for StockInfoResource {
    const URI_TEMPLATE: &'static str = "stock-info://{symbol}";
    const NAME: &'static str = "Stock Information";
    const DESCRIPTION: &'static str =
        "Company profile and key figures for a stock symbol";
    const MIME_TYPE: &'static str = "text/markdown";
}

impl StockInfoResource {
    /// Fetch and render the profile for `symbol`.
    pub async fn read(client: &FmpClient, symbol: &str) -> String {
        let data = client.get("profile", &[("symbol", symbol.to_string())]).await;
        CompanyProfileTool::render(symbol, &data)
    }
}
