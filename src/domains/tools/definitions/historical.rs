//! Historical price tool.
//!
//! End-of-day price history with derived daily changes.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::core::api::{ApiResponse, FmpClient};

use super::common::{
    self, change_emoji, field, format_currency, format_number, format_percent, num, text_or,
    timestamp_line,
};

fn default_history_limit() -> usize {
    30
}

/// Parameters for the historical price tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HistoricalPriceParams {
    /// Ticker symbol (stock, commodity, forex pair, or crypto).
    #[schemars(description = "Ticker symbol (e.g., AAPL, GCUSD, EURUSD, BTCUSD)")]
    pub symbol: String,

    /// Start of the date range (YYYY-MM-DD).
    #[schemars(description = "Start date in YYYY-MM-DD format")]
    #[serde(default)]
    pub from_date: Option<String>,

    /// End of the date range (YYYY-MM-DD).
    #[schemars(description = "End date in YYYY-MM-DD format")]
    #[serde(default)]
    pub to_date: Option<String>,

    /// Maximum number of rows to return.
    #[schemars(description = "Maximum number of rows (default: 30)")]
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

/// End-of-day historical price tool.
#[derive(Debug, Clone)]
pub struct HistoricalPriceTool;

impl HistoricalPriceTool {
    pub const NAME: &'static str = "get_historical_price_eod_light";

    pub const DESCRIPTION: &'static str =
        "Get end-of-day price history for a symbol, with volume and derived \
         day-over-day changes. Supports an optional date range.";

    pub async fn execute(client: &FmpClient, params: &HistoricalPriceParams) -> String {
        info!(symbol = %params.symbol, "fetching historical prices");
        let mut query = vec![("symbol", params.symbol.clone())];
        if let Some(from) = &params.from_date {
            query.push(("from", from.clone()));
        }
        if let Some(to) = &params.to_date {
            query.push(("to", to.clone()));
        }
        let data = client.get("historical-price-eod/light", &query).await;
        Self::render(
            &params.symbol,
            params.from_date.as_deref(),
            params.to_date.as_deref(),
            params.limit,
            &data,
        )
    }

    pub fn render(
        symbol: &str,
        from_date: Option<&str>,
        to_date: Option<&str>,
        limit: usize,
        data: &ApiResponse,
    ) -> String {
        let rows = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching historical prices for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No historical price data found for {symbol}"),
            },
        };

        let mut lines = vec![format!("# Historical Price Data for {symbol}")];
        if let Some(from) = from_date {
            lines.push(format!("From: {from}"));
        }
        if let Some(to) = to_date {
            lines.push(format!("To: {to}"));
        }
        lines.push(timestamp_line());
        lines.push(String::new());
        lines.push("| Date | Price | Volume | Daily Change | Daily Change % |".to_string());
        lines.push("|------|-------|--------|--------------|----------------|".to_string());

        // Rows arrive newest first; the previous trading day is the next row.
        for (i, row) in rows.iter().take(limit).enumerate() {
            let (change, change_percent) = Self::daily_change(row, rows.get(i + 1));
            let change_cell = match change {
                Some(value) => format!(
                    "{} {}",
                    change_emoji(value),
                    format_currency(Some(&Value::from(value)))
                ),
                None => "N/A".to_string(),
            };
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                text_or(row, "date", "N/A"),
                format_currency(field(row, "price")),
                format_number(field(row, "volume")),
                change_cell,
                format_percent(change_percent)
            ));
        }

        lines.join("\n")
    }

    /// Day-over-day change against the previous row, when one exists.
    fn daily_change(row: &Value, previous: Option<&Value>) -> (Option<f64>, Option<f64>) {
        let price = num(row, "price");
        let prev_price = previous.and_then(|p| num(p, "price")).filter(|p| *p != 0.0);
        match (price, prev_price) {
            (Some(price), Some(prev)) => {
                let change = price - prev;
                (Some(change), Some(change / prev * 100.0))
            }
            _ => (None, None),
        }
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<HistoricalPriceParams>(),
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
            |client, params: HistoricalPriceParams| {
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

    fn history_payload() -> ApiResponse {
        ApiResponse::Payload(json!([
            {"symbol": "GCUSD", "date": "2025-06-04", "price": 3375.5, "volume": 171130},
            {"symbol": "GCUSD", "date": "2025-06-03", "price": 3350.0, "volume": 155000},
            {"symbol": "GCUSD", "date": "2025-06-02", "price": 3400.0, "volume": 160250}
        ]))
    }

    #[test]
    fn test_historical_render() {
        let report = HistoricalPriceTool::render("GCUSD", None, None, 30, &history_payload());
        assert!(report.contains("# Historical Price Data for GCUSD"));
        assert!(report.contains("| Date | Price | Volume | Daily Change | Daily Change % |"));
        assert!(report.contains("| 2025-06-04 | $3,375.50 | 171,130 | 🔺 $25.50 |"));
        assert!(report.contains("| 2025-06-03 | $3,350.00 | 155,000 | 🔻 $-50.00 |"));
        // Oldest row has no previous day to diff against.
        assert!(report.contains("| 2025-06-02 | $3,400.00 | 160,250 | N/A | N/A |"));
        assert!(report.contains("*Data as of "));
    }

    #[test]
    fn test_historical_render_with_range() {
        let report = HistoricalPriceTool::render(
            "GCUSD",
            Some("2025-05-04"),
            Some("2025-06-04"),
            30,
            &history_payload(),
        );
        assert!(report.contains("From: 2025-05-04"));
        assert!(report.contains("To: 2025-06-04"));
    }

    #[test]
    fn test_historical_respects_limit() {
        let report = HistoricalPriceTool::render("GCUSD", None, None, 1, &history_payload());
        assert!(report.contains("| 2025-06-04 |"));
        assert!(!report.contains("| 2025-06-03 |"));
    }

    #[test]
    fn test_historical_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::ConnectionError, "connection reset");
        assert_eq!(
            HistoricalPriceTool::render("GCUSD", None, None, 30, &error),
            "Error fetching historical prices for GCUSD: connection reset"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            HistoricalPriceTool::render("GCUSD", None, None, 30, &empty),
            "No historical price data found for GCUSD"
        );
    }

    #[test]
    fn test_daily_change_math() {
        let today = json!({"price": 110.0});
        let yesterday = json!({"price": 100.0});
        let (change, percent) = HistoricalPriceTool::daily_change(&today, Some(&yesterday));
        assert_eq!(change, Some(10.0));
        assert!((percent.unwrap() - 10.0).abs() < 1e-9);
    }
}
