//! Cryptocurrency tools.
//!
//! Available cryptocurrencies and per-coin quotes.

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

/// Parameters for the crypto quote tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CryptoQuoteParams {
    /// Cryptocurrency symbol.
    #[schemars(description = "Cryptocurrency symbol (e.g., BTCUSD, ETHUSD)")]
    pub symbol: String,
}

/// Available cryptocurrencies tool.
#[derive(Debug, Clone)]
pub struct CryptoListTool;

impl CryptoListTool {
    pub const NAME: &'static str = "get_crypto_list";

    pub const DESCRIPTION: &'static str =
        "List the cryptocurrencies available from the data provider.";

    pub async fn execute(client: &FmpClient) -> String {
        info!("fetching cryptocurrency list");
        let data = client.get("cryptocurrency-list", &[]).await;
        Self::render(&data)
    }

    pub fn render(data: &ApiResponse) -> String {
        let coins = match data {
            ApiResponse::Error(envelope) => {
                return format!("Error fetching cryptocurrency list: {}", envelope.message);
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return "No cryptocurrency data found".to_string(),
            },
        };

        let mut lines = vec![
            "# Available Cryptocurrencies".to_string(),
            String::new(),
            "| Symbol | Name | Currency |".to_string(),
            "|--------|------|----------|".to_string(),
        ];

        for coin in coins {
            lines.push(format!(
                "| {} | {} | {} |",
                text_or(coin, "symbol", "N/A"),
                text_or(coin, "name", "N/A"),
                text_or(coin, "currency", "N/A")
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

/// Cryptocurrency quote tool.
#[derive(Debug, Clone)]
pub struct CryptoQuoteTool;

impl CryptoQuoteTool {
    pub const NAME: &'static str = "get_crypto_quote";

    pub const DESCRIPTION: &'static str =
        "Get current quotes for a cryptocurrency: price, change, market cap, \
         and volume.";

    pub async fn execute(client: &FmpClient, params: &CryptoQuoteParams) -> String {
        info!(symbol = %params.symbol, "fetching crypto quote");
        let data = client
            .get("quote", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let quotes = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching crypto quote for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No crypto quote data found for {symbol}"),
            },
        };

        let mut lines = vec![
            "# Cryptocurrency Quotes".to_string(),
            timestamp_line(),
            String::new(),
            "| Symbol | Name | Price | Change | Change % | Market Cap | Volume |".to_string(),
            "|--------|------|-------|--------|----------|------------|--------|".to_string(),
        ];

        for quote in quotes {
            let change = num(quote, "change").unwrap_or(0.0);
            lines.push(format!(
                "| {} | {} | {} | {} {} | {} | {} | {} |",
                text_or(quote, "symbol", "N/A"),
                text_or(quote, "name", "N/A"),
                format_currency(field(quote, "price")),
                change_emoji(change),
                format_currency(field(quote, "change")),
                format_percent(num(quote, "changesPercentage")),
                format_currency(field(quote, "marketCap")),
                format_number(field(quote, "volume"))
            ));
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CryptoQuoteParams>(),
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
            |client, params: CryptoQuoteParams| {
                Box::pin(async move { Self::execute(&client, &params).await })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_crypto_list_render() {
        let data = ApiResponse::Payload(json!([
            {"symbol": "BTCUSD", "name": "Bitcoin USD", "currency": "USD"},
            {"symbol": "ETHUSD", "name": "Ethereum USD", "currency": "USD"}
        ]));
        let report = CryptoListTool::render(&data);
        assert!(report.contains("# Available Cryptocurrencies"));
        assert!(report.contains("| Symbol | Name | Currency |"));
        assert!(report.contains("| BTCUSD | Bitcoin USD | USD |"));
        assert!(report.contains("| ETHUSD | Ethereum USD | USD |"));
    }

    #[test]
    fn test_crypto_quote_render() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "BTCUSD",
            "name": "Bitcoin USD",
            "price": 104250.55,
            "change": 1250.3,
            "changesPercentage": 1.21,
            "marketCap": 2071000000000_i64,
            "volume": 28400000000_i64
        }]));
        let report = CryptoQuoteTool::render("BTCUSD", &data);
        assert!(report.contains("# Cryptocurrency Quotes"));
        assert!(
            report.contains("| Symbol | Name | Price | Change | Change % | Market Cap | Volume |")
        );
        assert!(report.contains("| BTCUSD | Bitcoin USD | $104,250.55 | 🔺 $1,250.30 | 1.21% |"));
    }

    #[test]
    fn test_crypto_quote_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::Timeout, "deadline exceeded");
        assert_eq!(
            CryptoQuoteTool::render("BTCUSD", &error),
            "Error fetching crypto quote for BTCUSD: deadline exceeded"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            CryptoQuoteTool::render("BTCUSD", &empty),
            "No crypto quote data found for BTCUSD"
        );
    }
}
