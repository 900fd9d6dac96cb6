//! Commodities tools.
//!
//! Available commodities and current commodity prices.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::api::{ApiResponse, FmpClient};

use super::common::{
    self, change_emoji, field, format_currency, format_number, format_percent, num, text_or,
    timestamp_line,
};

/// Parameters for the commodities prices tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CommoditiesPricesParams {
    /// Commodity symbol.
    #[schemars(description = "Commodity symbol (e.g., GCUSD for gold, BZUSD for Brent crude)")]
    pub symbol: String,
}

/// Available commodities tool.
#[derive(Debug, Clone)]
pub struct CommoditiesListTool;

impl CommoditiesListTool {
    pub const NAME: &'static str = "get_commodities_list";

    pub const DESCRIPTION: &'static str =
        "List the commodities available from the data provider.";

    pub async fn execute(client: &FmpClient) -> String {
        info!("fetching commodities list");
        let data = client.get("commodities-list", &[]).await;
        Self::render(&data)
    }

    pub fn render(data: &ApiResponse) -> String {
        let commodities = match data {
            ApiResponse::Error(envelope) => {
                return format!("Error fetching commodities list: {}", envelope.message);
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return "No commodities data found".to_string(),
            },
        };

        let mut lines = vec![
            "# Available Commodities".to_string(),
            String::new(),
            "| Symbol | Name | Currency | Group |".to_string(),
            "|--------|------|----------|-------|".to_string(),
        ];

        for commodity in commodities {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                text_or(commodity, "symbol", "N/A"),
                text_or(commodity, "name", "N/A"),
                text_or(commodity, "currency", "N/A"),
                text_or(commodity, "group", "N/A")
            ));
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        #[derive(Deserialize, JsonSchema)]
        struct NoParams {}

        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NoParams>(),
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
        common::list_route(Self::to_tool(), client, |client| {
            Box::pin(async move { Self::execute(&client).await })
        })
    }
}

/// Commodity prices tool.
#[derive(Debug, Clone)]
pub struct CommoditiesPricesTool;

impl CommoditiesPricesTool {
    pub const NAME: &'static str = "get_commodities_prices";

    pub const DESCRIPTION: &'static str =
        "Get current prices for a commodity: price, change, and volume.";

    pub async fn execute(client: &FmpClient, params: &CommoditiesPricesParams) -> String {
        info!(symbol = %params.symbol, "fetching commodity prices");
        let data = client
            .get("quote", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let quotes = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching commodity prices for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No commodity price data found for {symbol}"),
            },
        };

        let mut lines = vec![
            "# Commodities Prices".to_string(),
            timestamp_line(),
            String::new(),
            "| Symbol | Name | Price | Change | Change % | Volume |".to_string(),
            "|--------|------|-------|--------|----------|--------|".to_string(),
        ];

        for quote in quotes {
            let change = num(quote, "change").unwrap_or(0.0);
            lines.push(format!(
                "| {} | {} | {} | {} {} | {} | {} |",
                text_or(quote, "symbol", "N/A"),
                text_or(quote, "name", "N/A"),
                format_currency(field(quote, "price")),
                change_emoji(change),
                format_currency(field(quote, "change")),
                format_percent(num(quote, "changesPercentage")),
                format_number(field(quote, "volume"))
            ));
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CommoditiesPricesParams>(),
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
        common::markdown_route(
            Self::to_tool(),
            client,
            |client, params: CommoditiesPricesParams| {
                Box::pin(async move { Self::execute(&client, &params).await })
            },
        )
    }
}
