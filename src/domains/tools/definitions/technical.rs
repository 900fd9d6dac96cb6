//! Technical indicator tools.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::api::{ApiResponse, FmpClient};

use super::common::{self, field, format_number, text_or, timestamp_line};

fn default_period() -> usize {
    10
}

fn default_timeframe() -> String {
    "1day".to_string()
}

/// Parameters for the EMA tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EmaParams {
    /// Stock ticker symbol.
    #[schemars(description = "Stock ticker symbol (e.g., AAPL, MSFT)")]
    pub symbol: String,

    /// Number of periods the average is computed over.
    #[schemars(description = "Number of periods for the average (default: 10)")]
    #[serde(default = "default_period")]
    pub period: usize,

    /// Candle timeframe.
    #[schemars(description = "Candle timeframe: 1min, 5min, 15min, 30min, 1hour, 4hour, 1day")]
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
}

/// Exponential moving average tool.
#[derive(Debug, Clone)]
pub struct EmaTool;

impl EmaTool {
    pub const NAME: &'static str = "get_ema";

    pub const DESCRIPTION: &'static str =
        "Get the exponential moving average (EMA) for a symbol alongside \
         closing prices, with a short interpretation guide.";

    pub async fn execute(client: &FmpClient, params: &EmaParams) -> String {
        info!(symbol = %params.symbol, period = params.period, "fetching EMA");
        let data = client
            .get(
                "technical-indicators/ema",
                &[
                    ("symbol", params.symbol.clone()),
                    ("periodLength", params.period.to_string()),
                    ("timeframe", params.timeframe.clone()),
                ],
            )
            .await;
        Self::render(&params.symbol, params.period, &params.timeframe, &data)
    }

    pub fn render(symbol: &str, period: usize, timeframe: &str, data: &ApiResponse) -> String {
        let candles = match data {
            ApiResponse::Error(envelope) => {
                return format!("Error fetching EMA for {symbol}: {}", envelope.message);
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No EMA data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![
            format!("# Exponential Moving Average (EMA) for {symbol}"),
            format!("Period: {period}, Time Frame: {timeframe}"),
            timestamp_line(),
            String::new(),
            "| Date | Close | EMA |".to_string(),
            "|------|-------|-----|".to_string(),
        ];

        for candle in candles {
            lines.push(format!(
                "| {} | {} | {} |",
                text_or(candle, "date", "N/A"),
                format_number(field(candle, "close")),
                format_number(field(candle, "ema"))
            ));
        }

        lines.push(String::new());
        lines.push("## Indicator Interpretation".to_string());
        lines.push(
            "* The Exponential Moving Average is a trend-following indicator that \
             weights recent prices more heavily than older ones."
                .to_string(),
        );
        lines.push(
            "* Price above the EMA suggests an uptrend; price below the EMA suggests \
             a downtrend."
                .to_string(),
        );
        lines.push(
            "* Crossovers between price and the EMA are commonly used as entry and \
             exit signals."
                .to_string(),
        );

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<EmaParams>(),
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
        common::markdown_route(Self::to_tool(), client, |client, params: EmaParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}
