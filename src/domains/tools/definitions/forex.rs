//! Foreign exchange tools.
//!
//! Available currency pairs and per-pair exchange rate quotes.

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

/// Parameters for the forex quote tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ForexQuoteParams {
    /// Currency pair symbol.
    #[schemars(description = "Currency pair symbol (e.g., EURUSD, GBPUSD)")]
    pub symbol: String,
}

/// Display a pair symbol like `EURUSD` as `EUR/USD`.
fn pair_display(symbol: &str) -> String {
    if symbol.len() == 6 && symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{}/{}", &symbol[..3], &symbol[3..])
    } else {
        symbol.to_string()
    }
}

/// Available forex pairs tool.
#[derive(Debug, Clone)]
pub struct ForexListTool;

impl ForexListTool {
    pub const NAME: &'static str = "get_forex_list";

    pub const DESCRIPTION: &'static str =
        "List the currency pairs available from the data provider.";

    pub async fn execute(client: &FmpClient) -> String {
        info!("fetching forex pair list");
        let data = client.get("forex-list", &[]).await;
        Self::render(&data)
    }

    pub fn render(data: &ApiResponse) -> String {
        let pairs = match data {
            ApiResponse::Error(envelope) => {
                return format!("Error fetching forex pairs: {}", envelope.message);
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return "No forex pair data found".to_string(),
            },
        };

        let mut lines = vec![
            "# Available Forex Pairs".to_string(),
            String::new(),
            "| Symbol | Base Currency | Quote Currency | Base Name | Quote Name |".to_string(),
            "|--------|---------------|----------------|-----------|------------|".to_string(),
        ];

        for pair in pairs {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                text_or(pair, "symbol", "N/A"),
                text_or(pair, "fromCurrency", "N/A"),
                text_or(pair, "toCurrency", "N/A"),
                text_or(pair, "fromName", "N/A"),
                text_or(pair, "toName", "N/A")
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

/// Forex pair quote tool.
#[derive(Debug, Clone)]
pub struct ForexQuoteTool;

impl ForexQuoteTool {
    pub const NAME: &'static str = "get_forex_quote";

    pub const DESCRIPTION: &'static str =
        "Get the current exchange rate for a currency pair, with day and \
         52-week ranges and moving averages.";

    pub async fn execute(client: &FmpClient, params: &ForexQuoteParams) -> String {
        info!(symbol = %params.symbol, "fetching forex quote");
        let data = client
            .get("quote", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let quote = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching forex quote for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No forex quote data found for {symbol}"),
            },
        };

        let change = num(quote, "change").unwrap_or(0.0);

        let lines = [
            format!("# Forex Quote: {}", pair_display(symbol)),
            timestamp_line(),
            String::new(),
            format!(
                "**Exchange Rate**: {}",
                format_number(field(quote, "price"))
            ),
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
            String::new(),
            "## Range Information".to_string(),
            format!(
                "**Day Range**: {} - {}",
                format_number(field(quote, "dayLow")),
                format_number(field(quote, "dayHigh"))
            ),
            format!(
                "**52 Week Range**: {} - {}",
                format_number(field(quote, "yearLow")),
                format_number(field(quote, "yearHigh"))
            ),
            format!(
                "**50-Day Average**: {}",
                format_number(field(quote, "priceAvg50"))
            ),
            format!(
                "**200-Day Average**: {}",
                format_number(field(quote, "priceAvg200"))
            ),
        ];

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ForexQuoteParams>(),
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
            |client, params: ForexQuoteParams| {
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
    fn test_pair_display() {
        assert_eq!(pair_display("EURUSD"), "EUR/USD");
        assert_eq!(pair_display("GBPUSD"), "GBP/USD");
        assert_eq!(pair_display("^GSPC"), "^GSPC");
    }

    #[test]
    fn test_forex_list_render() {
        let data = ApiResponse::Payload(json!([
            {
                "symbol": "EURUSD",
                "fromCurrency": "EUR",
                "toCurrency": "USD",
                "fromName": "Euro",
                "toName": "US Dollar"
            },
            {
                "symbol": "GBPUSD",
                "fromCurrency": "GBP",
                "toCurrency": "USD",
                "fromName": "British Pound",
                "toName": "US Dollar"
            }
        ]));
        let report = ForexListTool::render(&data);
        assert!(report.contains("# Available Forex Pairs"));
        assert!(
            report.contains("| Symbol | Base Currency | Quote Currency | Base Name | Quote Name |")
        );
        assert!(report.contains("| EURUSD | EUR | USD | Euro | US Dollar |"));
        assert!(report.contains("| GBPUSD |"));
    }

    #[test]
    fn test_forex_quote_render() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "EURUSD",
            "price": 1.1437,
            "change": 0.0024,
            "changesPercentage": 0.21,
            "previousClose": 1.1413,
            "open": 1.1415,
            "dayLow": 1.1401,
            "dayHigh": 1.1448,
            "yearLow": 1.0177,
            "yearHigh": 1.1573,
            "priceAvg50": 1.1266,
            "priceAvg200": 1.0853
        }]));
        let report = ForexQuoteTool::render("EURUSD", &data);
        assert!(report.contains("# Forex Quote: EUR/USD"));
        assert!(report.contains("**Exchange Rate**: 1.14"));
        assert!(report.contains("## Trading Information"));
        assert!(report.contains("## Range Information"));
        assert!(report.contains("**Day Range**: 1.14 - 1.14"));
        assert!(report.contains("**52 Week Range**: 1.02 - 1.16"));
        assert!(report.contains("**50-Day Average**: 1.13"));
        assert!(report.contains("**200-Day Average**: 1.09"));
    }

    #[test]
    fn test_forex_quote_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::ConnectionError, "refused");
        assert_eq!(
            ForexQuoteTool::render("EURUSD", &error),
            "Error fetching forex quote for EURUSD: refused"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            ForexQuoteTool::render("EURUSD", &empty),
            "No forex quote data found for EURUSD"
        );
    }

    #[test]
    fn test_forex_list_empty() {
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(ForexListTool::render(&empty), "No forex pair data found");
    }
}
