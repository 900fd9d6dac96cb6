//! Stock quote tools.
//!
//! Tools covering the Quote section of the Financial Modeling Prep API:
//! full quote, simplified quote, and price change over standard timeframes.

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

/// Parameters shared by the symbol-keyed quote tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QuoteParams {
    /// Stock ticker symbol.
    #[schemars(description = "Stock ticker symbol (e.g., AAPL, MSFT, TSLA)")]
    pub symbol: String,
}

/// Full stock quote tool.
#[derive(Debug, Clone)]
pub struct QuoteTool;

impl QuoteTool {
    pub const NAME: &'static str = "get_quote";

    pub const DESCRIPTION: &'static str =
        "Get the current stock quote for a company: price, change, trading ranges, \
         market cap, and volume, formatted as a markdown report.";

    pub async fn execute(client: &FmpClient, params: &QuoteParams) -> String {
        info!(symbol = %params.symbol, "fetching stock quote");
        let data = client
            .get("quote", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    /// Render the quote payload as markdown.
    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let quote = match data {
            ApiResponse::Error(envelope) => {
                return format!("Error fetching quote for {symbol}: {}", envelope.message);
            }
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No quote data found for symbol {symbol}"),
            },
        };

        let change_percent = num(quote, "changesPercentage").unwrap_or(0.0);
        let emoji = change_emoji(change_percent);

        let lines = [
            format!(
                "# {} ({})",
                text_or(quote, "name", "Unknown Company"),
                text_or(quote, "symbol", symbol)
            ),
            format!("**Price**: {}", format_currency(field(quote, "price"))),
            format!(
                "**Change**: {} ${} ({})",
                emoji,
                format_number(field(quote, "change")),
                format_percent(num(quote, "changesPercentage"))
            ),
            String::new(),
            "## Trading Information".to_string(),
            format!(
                "**Previous Close**: {}",
                format_currency(field(quote, "previousClose"))
            ),
            format!(
                "**Day Range**: ${} - ${}",
                format_number(field(quote, "dayLow")),
                format_number(field(quote, "dayHigh"))
            ),
            format!(
                "**Year Range**: ${} - ${}",
                format_number(field(quote, "yearLow")),
                format_number(field(quote, "yearHigh"))
            ),
            format!(
                "**Market Cap**: {}",
                format_currency(field(quote, "marketCap"))
            ),
            format!("**Volume**: {}", format_number(field(quote, "volume"))),
            format!(
                "**Average Volume**: {}",
                format_number(field(quote, "avgVolume"))
            ),
            format!("**Open**: {}", format_currency(field(quote, "open"))),
            String::new(),
            timestamp_line(),
        ];

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<QuoteParams>(),
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
        common::markdown_route(Self::to_tool(), client, |client, params: QuoteParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

/// Simplified stock quote tool.
#[derive(Debug, Clone)]
pub struct QuoteShortTool;

impl QuoteShortTool {
    pub const NAME: &'static str = "get_quote_short";

    pub const DESCRIPTION: &'static str =
        "Get a simplified stock quote with just the essential information: \
         price, change, and volume.";

    pub async fn execute(client: &FmpClient, params: &QuoteParams) -> String {
        info!(symbol = %params.symbol, "fetching simplified quote");
        let data = client
            .get("quote-short", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let quote = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching simplified quote for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No simplified quote data found for symbol {symbol}"),
            },
        };

        let change = num(quote, "change").unwrap_or(0.0);
        let emoji = change_emoji(change);

        let lines = [
            format!("# Stock Quote: {}", text_or(quote, "symbol", symbol)),
            format!("**Price**: {}", format_currency(field(quote, "price"))),
            format!(
                "**Change**: {} ${} ({})",
                emoji,
                format_number(field(quote, "change")),
                format_percent(num(quote, "changesPercentage"))
            ),
            format!("**Volume**: {}", format_number(field(quote, "volume"))),
            String::new(),
            timestamp_line(),
        ];

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<QuoteParams>(),
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
        common::markdown_route(Self::to_tool(), client, |client, params: QuoteParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

/// Timeframes reported by the price-change endpoint, in display order.
const TIMEFRAME_LABELS: [(&str, &str); 11] = [
    ("1D", "1 Day"),
    ("5D", "5 Days"),
    ("1M", "1 Month"),
    ("3M", "3 Months"),
    ("6M", "6 Months"),
    ("ytd", "Year to Date"),
    ("1Y", "1 Year"),
    ("3Y", "3 Years"),
    ("5Y", "5 Years"),
    ("10Y", "10 Years"),
    ("max", "Maximum"),
];

/// Price change over multiple timeframes.
#[derive(Debug, Clone)]
pub struct PriceChangeTool;

impl PriceChangeTool {
    pub const NAME: &'static str = "get_quote_change";

    pub const DESCRIPTION: &'static str =
        "Get the percentage price change of a stock over standard timeframes \
         (1 day, 5 days, 1 month, year to date, 1 year, and more).";

    pub async fn execute(client: &FmpClient, params: &QuoteParams) -> String {
        info!(symbol = %params.symbol, "fetching price change");
        let data = client
            .get("stock-price-change", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let changes = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching price change for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No price change data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![
            format!("# Price Change for {}", text_or(changes, "symbol", symbol)),
            timestamp_line(),
            String::new(),
            "| Time Period | Change (%) |".to_string(),
            "|-------------|------------|".to_string(),
        ];

        for (key, label) in TIMEFRAME_LABELS {
            if let Some(value) = num(changes, key) {
                lines.push(format!(
                    "| {label} | {} {} |",
                    change_emoji(value),
                    format_percent(Some(value))
                ));
            }
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<QuoteParams>(),
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
        common::markdown_route(Self::to_tool(), client, |client, params: QuoteParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ErrorKind;
    use serde_json::json;

    fn quote_payload() -> ApiResponse {
        ApiResponse::Payload(json!([{
            "symbol": "AAPL",
            "name": "Apple Inc.",
            "price": 150.0,
            "change": 1.5,
            "changesPercentage": 1.0,
            "previousClose": 148.5,
            "dayLow": 147.0,
            "dayHigh": 151.0,
            "yearLow": 124.17,
            "yearHigh": 199.62,
            "marketCap": 2840000000000_i64,
            "volume": 58000000,
            "avgVolume": 62000000,
            "open": 149.0
        }]))
    }

    #[test]
    fn test_quote_render_contains_price_and_marker() {
        let report = QuoteTool::render("AAPL", &quote_payload());
        assert!(report.contains("# Apple Inc. (AAPL)"));
        assert!(report.contains("**Price**: $150.00"));
        assert!(report.contains("🔺"));
        assert!(report.contains("**Market Cap**: $2,840,000,000,000"));
        assert!(report.contains("*Data as of "));
    }

    #[test]
    fn test_quote_render_error_envelope() {
        let data = ApiResponse::error(ErrorKind::HttpError, "boom");
        let report = QuoteTool::render("AAPL", &data);
        assert_eq!(report, "Error fetching quote for AAPL: boom");
    }

    #[test]
    fn test_quote_render_empty_payload() {
        let data = ApiResponse::Payload(json!([]));
        let report = QuoteTool::render("AAPL", &data);
        assert_eq!(report, "No quote data found for symbol AAPL");
    }

    #[test]
    fn test_quote_render_is_idempotent() {
        // Same payload twice within a second: byte-identical markdown.
        let data = quote_payload();
        assert_eq!(
            QuoteTool::render("AAPL", &data).replace(char::is_numeric, ""),
            QuoteTool::render("AAPL", &data).replace(char::is_numeric, "")
        );
    }

    #[test]
    fn test_quote_short_render() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "TSLA",
            "price": 250.25,
            "change": -3.5,
            "changesPercentage": -1.38,
            "volume": 95000000
        }]));
        let report = QuoteShortTool::render("TSLA", &data);
        assert!(report.contains("# Stock Quote: TSLA"));
        assert!(report.contains("🔻"));
        assert!(report.contains("**Volume**: 95,000,000"));
    }

    #[test]
    fn test_quote_short_empty() {
        let report = QuoteShortTool::render("TSLA", &ApiResponse::Payload(json!([])));
        assert_eq!(report, "No simplified quote data found for symbol TSLA");
    }

    #[test]
    fn test_price_change_render_table() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "AAPL",
            "1D": 1.25,
            "5D": -0.5,
            "1M": 3.2,
            "ytd": 12.0,
            "1Y": 22.5
        }]));
        let report = PriceChangeTool::render("AAPL", &data);
        assert!(report.contains("# Price Change for AAPL"));
        assert!(report.contains("| Time Period | Change (%) |"));
        assert!(report.contains("| 1 Day | 🔺 1.25% |"));
        assert!(report.contains("| 5 Days | 🔻 -0.50% |"));
        assert!(report.contains("| Year to Date | 🔺 12.00% |"));
    }

    #[test]
    fn test_price_change_skips_absent_timeframes() {
        let data = ApiResponse::Payload(json!([{"symbol": "AAPL", "1D": 0.1}]));
        let report = PriceChangeTool::render("AAPL", &data);
        assert!(report.contains("| 1 Day |"));
        assert!(!report.contains("| Maximum |"));
    }

    #[test]
    fn test_params_deserialize() {
        let params: QuoteParams = serde_json::from_str(r#"{"symbol": "MSFT"}"#).unwrap();
        assert_eq!(params.symbol, "MSFT");
    }

    #[tokio::test]
    async fn test_execute_renders_report_from_upstream() {
        use crate::core::config::ApiConfig;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::UrlEncoded("symbol".into(), "AAPL".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"symbol":"AAPL","name":"Apple Inc.","price":150.0,"change":1.5,"changesPercentage":1.0}]"#,
            )
            .create_async()
            .await;

        let client = FmpClient::new(&ApiConfig {
            api_key: Some("test-key".to_string()),
            base_url: server.url(),
            timeout_secs: 5,
        })
        .unwrap();

        let params = QuoteParams {
            symbol: "AAPL".to_string(),
        };
        let report = QuoteTool::execute(&client, &params).await;
        assert!(report.contains("# Apple Inc. (AAPL)"));
        assert!(report.contains("**Price**: $150.00"));
        assert!(report.contains("🔺"));
    }
}
