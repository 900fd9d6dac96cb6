//! Financial analysis tools.
//!
//! Ratio and key-metric reports derived from a company's filings.

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

use super::common::{self, field, format_currency, format_number, format_percent, num, text_or, timestamp_line};

/// Parameters for the ratios tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RatiosParams {
    /// Stock ticker symbol.
    #[schemars(description = "Stock ticker symbol (e.g., AAPL, MSFT, TSLA)")]
    pub symbol: String,
}

fn default_metrics_limit() -> usize {
    1
}

fn default_period() -> String {
    "annual".to_string()
}

/// Parameters for the key metrics tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct KeyMetricsParams {
    /// Stock ticker symbol.
    #[schemars(description = "Stock ticker symbol (e.g., AAPL, MSFT, TSLA)")]
    pub symbol: String,

    /// Reporting period.
    #[schemars(description = "Reporting period: 'annual' or 'quarter'")]
    #[serde(default = "default_period")]
    pub period: String,

    /// Number of periods to return.
    #[schemars(description = "Number of periods to return (default: 1)")]
    #[serde(default = "default_metrics_limit")]
    pub limit: usize,
}

/// Push a `**label**: value` line for a plain ratio.
fn ratio_line(lines: &mut Vec<String>, record: &Value, key: &str, label: &str) {
    lines.push(format!("**{label}**: {}", format_number(field(record, key))));
}

/// Push a `**label**: value%` line for a margin expressed as a fraction.
fn margin_line(lines: &mut Vec<String>, record: &Value, key: &str, label: &str) {
    let percent = num(record, key).map(|v| v * 100.0);
    lines.push(format!("**{label}**: {}", format_percent(percent)));
}

/// Financial ratios tool.
#[derive(Debug, Clone)]
pub struct FinancialRatiosTool;

impl FinancialRatiosTool {
    pub const NAME: &'static str = "get_financial_ratios";

    pub const DESCRIPTION: &'static str =
        "Get a company's financial ratios: liquidity, profitability, debt, \
         and valuation measures from the most recent filings.";

    pub async fn execute(client: &FmpClient, params: &RatiosParams) -> String {
        info!(symbol = %params.symbol, "fetching financial ratios");
        let data = client
            .get("ratios", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let ratios = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching financial ratios for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No financial ratio data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![
            format!("# Financial Ratios for {}", text_or(ratios, "symbol", symbol)),
            format!("*Period: {}*", text_or(ratios, "date", "most recent")),
            String::new(),
            "## Liquidity Ratios".to_string(),
        ];
        ratio_line(&mut lines, ratios, "currentRatio", "Current Ratio");
        ratio_line(&mut lines, ratios, "quickRatio", "Quick Ratio");
        ratio_line(&mut lines, ratios, "cashRatio", "Cash Ratio");

        lines.push(String::new());
        lines.push("## Profitability Ratios".to_string());
        margin_line(&mut lines, ratios, "grossProfitMargin", "Gross Profit Margin");
        margin_line(&mut lines, ratios, "operatingProfitMargin", "Operating Profit Margin");
        margin_line(&mut lines, ratios, "netProfitMargin", "Net Profit Margin");
        margin_line(&mut lines, ratios, "returnOnEquity", "Return on Equity");
        margin_line(&mut lines, ratios, "returnOnAssets", "Return on Assets");

        lines.push(String::new());
        lines.push("## Debt Ratios".to_string());
        ratio_line(&mut lines, ratios, "debtEquityRatio", "Debt to Equity");
        ratio_line(&mut lines, ratios, "interestCoverage", "Interest Coverage");

        lines.push(String::new());
        lines.push("## Valuation Ratios".to_string());
        ratio_line(&mut lines, ratios, "priceEarningsRatio", "Price to Earnings");
        ratio_line(&mut lines, ratios, "priceToBookRatio", "Price to Book");
        ratio_line(&mut lines, ratios, "priceToSalesRatio", "Price to Sales");
        margin_line(&mut lines, ratios, "dividendYield", "Dividend Yield");

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RatiosParams>(),
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
        common::markdown_route(Self::to_tool(), client, |client, params: RatiosParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

/// Key metrics tool.
#[derive(Debug, Clone)]
pub struct KeyMetricsTool;

impl KeyMetricsTool {
    pub const NAME: &'static str = "get_key_metrics";

    pub const DESCRIPTION: &'static str =
        "Get a company's key financial metrics: per-share figures, valuation \
         multiples, and capital efficiency measures.";

    pub async fn execute(client: &FmpClient, params: &KeyMetricsParams) -> String {
        info!(symbol = %params.symbol, period = %params.period, "fetching key metrics");
        let data = client
            .get(
                "key-metrics",
                &[
                    ("symbol", params.symbol.clone()),
                    ("period", params.period.clone()),
                    ("limit", params.limit.to_string()),
                ],
            )
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let records = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching key metrics for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No key metrics data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![format!("# Key Financial Metrics for {symbol}"), timestamp_line()];

        for metrics in records {
            lines.push(String::new());
            lines.push(format!(
                "## Period: {} ({})",
                text_or(metrics, "date", "Unknown"),
                text_or(metrics, "period", "FY")
            ));
            lines.push(String::new());
            lines.push("### Valuation".to_string());
            lines.push(format!(
                "**Market Cap**: {}",
                format_currency(field(metrics, "marketCap"))
            ));
            lines.push(format!(
                "**Enterprise Value**: {}",
                format_currency(field(metrics, "enterpriseValue"))
            ));
            ratio_line(&mut lines, metrics, "evToSales", "EV to Sales");
            ratio_line(&mut lines, metrics, "evToEBITDA", "EV to EBITDA");
            margin_line(&mut lines, metrics, "freeCashFlowYield", "Free Cash Flow Yield");
            margin_line(&mut lines, metrics, "earningsYield", "Earnings Yield");
            lines.push(String::new());
            lines.push("### Capital Efficiency".to_string());
            margin_line(&mut lines, metrics, "returnOnInvestedCapital", "Return on Invested Capital");
            ratio_line(&mut lines, metrics, "currentRatio", "Current Ratio");
            lines.push(format!(
                "**Working Capital**: {}",
                format_currency(field(metrics, "workingCapital"))
            ));
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<KeyMetricsParams>(),
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
        common::markdown_route(Self::to_tool(), client, |client, params: KeyMetricsParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_ratios_render() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "AAPL",
            "date": "2024-09-28",
            "currentRatio": 0.87,
            "quickRatio": 0.83,
            "grossProfitMargin": 0.4621,
            "netProfitMargin": 0.2397,
            "returnOnEquity": 1.6459,
            "debtEquityRatio": 1.87,
            "priceEarningsRatio": 29.25,
            "dividendYield": 0.0044
        }]));
        let report = FinancialRatiosTool::render("AAPL", &data);
        assert!(report.contains("# Financial Ratios for AAPL"));
        assert!(report.contains("## Liquidity Ratios"));
        assert!(report.contains("**Current Ratio**: 0.87"));
        assert!(report.contains("**Gross Profit Margin**: 46.21%"));
        assert!(report.contains("**Price to Earnings**: 29.25"));
        assert!(report.contains("**Dividend Yield**: 0.44%"));
    }

    #[test]
    fn test_ratios_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::HttpError, "HTTP 403 Forbidden");
        assert_eq!(
            FinancialRatiosTool::render("AAPL", &error),
            "Error fetching financial ratios for AAPL: HTTP 403 Forbidden"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            FinancialRatiosTool::render("AAPL", &empty),
            "No financial ratio data found for symbol AAPL"
        );
    }

    #[test]
    fn test_key_metrics_render() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "AAPL",
            "date": "2024-09-28",
            "period": "FY",
            "marketCap": 3495160329570_i64,
            "enterpriseValue": 3571846329570_i64,
            "evToSales": 9.13,
            "evToEBITDA": 26.52,
            "freeCashFlowYield": 0.0311,
            "returnOnInvestedCapital": 0.4543,
            "currentRatio": 0.87,
            "workingCapital": -23405000000_i64
        }]));
        let report = KeyMetricsTool::render("AAPL", &data);
        assert!(report.contains("# Key Financial Metrics for AAPL"));
        assert!(report.contains("**Market Cap**: $3,495,160,329,570"));
        assert!(report.contains("**EV to EBITDA**: 26.52"));
        assert!(report.contains("**Free Cash Flow Yield**: 3.11%"));
        assert!(report.contains("**Working Capital**: $-23,405,000,000"));
    }

    #[test]
    fn test_key_metrics_missing_fields_render_na() {
        let data = ApiResponse::Payload(json!([{"symbol": "AAPL", "date": "2024-09-28"}]));
        let report = KeyMetricsTool::render("AAPL", &data);
        assert!(report.contains("**Enterprise Value**: N/A"));
        assert!(report.contains("**Current Ratio**: N/A"));
    }
}
