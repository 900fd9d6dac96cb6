//! Market index tools.
//!
//! Available indices and per-index quotes.

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
    self, change_emoji, field, format_number, format_percent, num, text_or, timestamp_line,
};

/// Parameters for the index quote tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IndexQuoteParams {
    /// Index symbol.
    #[schemars(description = "Index symbol (e.g., ^GSPC, ^DJI, ^IXIC)")]
    pub symbol: String,
}

/// Available market indices tool.
#[derive(Debug, Clone)]
pub struct IndexListTool;

impl IndexListTool {
    pub const NAME: &'static str = "get_index_list";

    pub const DESCRIPTION: &'static str =
        "List the market indices available from the data provider.";

    pub async fn execute(client: &FmpClient) -> String {
        info!("fetching index list");
        let data = client.get("index-list", &[]).await;
        Self::render(&data)
    }

    pub fn render(data: &ApiResponse) -> String {
        let indices = match data {
            ApiResponse::Error(envelope) => {
                return format!("Error fetching index list: {}", envelope.message);
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return "No index data found".to_string(),
            },
        };

        let mut lines = vec![
            "# Market Indices List".to_string(),
            String::new(),
            "| Symbol | Name | Exchange | Currency |".to_string(),
            "|--------|------|----------|----------|".to_string(),
        ];

        for index in indices {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                text_or(index, "symbol", "N/A"),
                text_or(index, "name", "N/A"),
                text_or(index, "exchange", "N/A"),
                text_or(index, "currency", "N/A")
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

/// Market index quote tool.
#[derive(Debug, Clone)]
pub struct IndexQuoteTool;

impl IndexQuoteTool {
    pub const NAME: &'static str = "get_index_quote";

    pub const DESCRIPTION: &'static str =
        "Get the current value of a market index, with change and trading \
         ranges.";

    pub async fn execute(client: &FmpClient, params: &IndexQuoteParams) -> String {
        info!(symbol = %params.symbol, "fetching index quote");
        let data = client
            .get("quote", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let quote = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching index quote for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No index quote data found for {symbol}"),
            },
        };

        let change = num(quote, "change").unwrap_or(0.0);

        let lines = [
            format!(
                "# {} ({})",
                text_or(quote, "name", "Unknown Index"),
                text_or(quote, "symbol", symbol)
            ),
            timestamp_line(),
            String::new(),
            format!("**Value**: {}", format_number(field(quote, "price"))),
            format!(
                "**Change**: {} {} ({})",
                change_emoji(change),
                format_number(field(quote, "change")),
                format_percent(num(quote, "changesPercentage"))
            ),
            String::new(),
            "## Trading Information".to_string(),
            format!(
                "**Previous Close**: {}",
                format_number(field(quote, "previousClose"))
            ),
            format!("**Open**: {}", format_number(field(quote, "open"))),
            format!(
                "**Day Range**: {} - {}",
                format_number(field(quote, "dayLow")),
                format_number(field(quote, "dayHigh"))
            ),
            format!(
                "**Year Range**: {} - {}",
                format_number(field(quote, "yearLow")),
                format_number(field(quote, "yearHigh"))
            ),
        ];

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<IndexQuoteParams>(),
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
            |client, params: IndexQuoteParams| {
                Box::pin(async move { Self::execute(&client, &params).await })
            },
        )
    }
}
