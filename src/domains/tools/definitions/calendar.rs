//! Dividend calendar tools.
//!
//! Per-company dividend history and the market-wide dividend calendar.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::api::{ApiResponse, FmpClient};

use super::common::{self, field, format_currency, format_percent, num, text, text_or};

/// Parameters for the company dividends tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyDividendsParams {
    /// Stock ticker symbol.
    #[schemars(description = "Stock ticker symbol (e.g., AAPL, MSFT)")]
    pub symbol: String,
}

/// Parameters for the dividends calendar tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DividendsCalendarParams {
    /// Start of the date range (YYYY-MM-DD).
    #[schemars(description = "Start date in YYYY-MM-DD format")]
    #[serde(default)]
    pub from_date: Option<String>,

    /// End of the date range (YYYY-MM-DD).
    #[schemars(description = "End date in YYYY-MM-DD format")]
    #[serde(default)]
    pub to_date: Option<String>,
}

/// Company dividend history tool.
#[derive(Debug, Clone)]
pub struct CompanyDividendsTool;

impl CompanyDividendsTool {
    pub const NAME: &'static str = "get_company_dividends";

    pub const DESCRIPTION: &'static str =
        "Get a company's dividend history: amounts, record/payment/declaration \
         dates, frequency, and current yield.";

    pub async fn execute(client: &FmpClient, params: &CompanyDividendsParams) -> String {
        info!(symbol = %params.symbol, "fetching dividend history");
        let data = client
            .get("dividends", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let dividends = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching dividend history for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No dividend data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![format!("# Dividend History for {symbol}"), String::new()];

        // Frequency and yield come from the most recent entry.
        if let Some(latest) = dividends.first() {
            if let Some(frequency) = text(latest, "frequency") {
                lines.push(format!("**Dividend Frequency**: {frequency}"));
            }
            if let Some(current_yield) = num(latest, "yield") {
                lines.push(format!(
                    "**Current Yield**: {}",
                    format_percent(Some(current_yield))
                ));
            }
            lines.push(String::new());
        }

        lines.push("## Dividend History".to_string());
        lines.push(String::new());
        lines.push(
            "| Date | Dividend | Adjusted Dividend | Record Date | Payment Date | Declaration Date |"
                .to_string(),
        );
        lines.push(
            "|------|----------|-------------------|-------------|--------------|------------------|"
                .to_string(),
        );

        for dividend in dividends {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                text_or(dividend, "date", "N/A"),
                format_currency(field(dividend, "dividend")),
                format_currency(field(dividend, "adjDividend")),
                text_or(dividend, "recordDate", "N/A"),
                text_or(dividend, "paymentDate", "N/A"),
                text_or(dividend, "declarationDate", "N/A")
            ));
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CompanyDividendsParams>(),
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
            |client, params: CompanyDividendsParams| {
                Box::pin(async move { Self::execute(&client, &params).await })
            },
        )
    }
}

/// Market-wide dividend calendar tool.
#[derive(Debug, Clone)]
pub struct DividendsCalendarTool;

impl DividendsCalendarTool {
    pub const NAME: &'static str = "get_dividends_calendar";

    pub const DESCRIPTION: &'static str =
        "Get upcoming dividend events across the market for a date range.";

    pub async fn execute(client: &FmpClient, params: &DividendsCalendarParams) -> String {
        info!(
            from = params.from_date.as_deref().unwrap_or("-"),
            to = params.to_date.as_deref().unwrap_or("-"),
            "fetching dividends calendar"
        );
        let mut query = Vec::new();
        if let Some(from) = &params.from_date {
            query.push(("from", from.clone()));
        }
        if let Some(to) = &params.to_date {
            query.push(("to", to.clone()));
        }
        let data = client.get("dividends-calendar", &query).await;
        Self::render(params.from_date.as_deref(), params.to_date.as_deref(), &data)
    }

    pub fn render(from_date: Option<&str>, to_date: Option<&str>, data: &ApiResponse) -> String {
        let heading = match (from_date, to_date) {
            (Some(from), Some(to)) => format!("# Dividend Calendar: {from} to {to}"),
            _ => "# Dividend Calendar".to_string(),
        };

        let events = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching dividends calendar: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => {
                    return format!("{heading}\n\nNo dividend events found for the selected period");
                }
            },
        };

        let mut lines = vec![
            heading,
            String::new(),
            "| Symbol | Dividend | Yield | Frequency | Record Date | Payment Date | Declaration Date |"
                .to_string(),
            "|--------|----------|-------|-----------|-------------|--------------|------------------|"
                .to_string(),
        ];

        for event in events {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} | {} |",
                text_or(event, "symbol", "N/A"),
                format_currency(field(event, "dividend")),
                format_percent(num(event, "yield")),
                text_or(event, "frequency", "N/A"),
                text_or(event, "recordDate", "N/A"),
                text_or(event, "paymentDate", "N/A"),
                text_or(event, "declarationDate", "N/A")
            ));
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DividendsCalendarParams>(),
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
            |client, params: DividendsCalendarParams| {
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
    fn test_company_dividends_render() {
        let data = ApiResponse::Payload(json!([
            {
                "symbol": "AAPL",
                "date": "2025-05-12",
                "recordDate": "2025-05-12",
                "paymentDate": "2025-05-15",
                "declarationDate": "2025-05-01",
                "adjDividend": 0.26,
                "dividend": 0.26,
                "yield": 0.43,
                "frequency": "Quarterly"
            },
            {
                "symbol": "AAPL",
                "date": "2025-02-10",
                "recordDate": "2025-02-10",
                "paymentDate": "2025-02-13",
                "declarationDate": "2025-01-30",
                "adjDividend": 0.25,
                "dividend": 0.25
            }
        ]));
        let report = CompanyDividendsTool::render("AAPL", &data);
        assert!(report.contains("# Dividend History for AAPL"));
        assert!(report.contains("**Dividend Frequency**: Quarterly"));
        assert!(report.contains("**Current Yield**: 0.43%"));
        assert!(report.contains(
            "| Date | Dividend | Adjusted Dividend | Record Date | Payment Date | Declaration Date |"
        ));
        assert!(report.contains("| 2025-05-12 | $0.26 |"));
        assert!(report.contains("| 2025-02-10 | $0.25 |"));
    }

    #[test]
    fn test_company_dividends_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::Timeout, "deadline exceeded");
        assert_eq!(
            CompanyDividendsTool::render("AAPL", &error),
            "Error fetching dividend history for AAPL: deadline exceeded"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            CompanyDividendsTool::render("AAPL", &empty),
            "No dividend data found for symbol AAPL"
        );
    }

    #[test]
    fn test_calendar_render_with_range() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "KO",
            "dividend": 0.485,
            "yield": 2.87,
            "frequency": "Quarterly",
            "recordDate": "2025-06-13",
            "paymentDate": "2025-07-01",
            "declarationDate": "2025-04-30"
        }]));
        let report = DividendsCalendarTool::render(Some("2025-06-01"), Some("2025-07-01"), &data);
        assert!(report.contains("# Dividend Calendar: 2025-06-01 to 2025-07-01"));
        assert!(report.contains("| KO | $0.49 | 2.87% | Quarterly |"));
    }

    #[test]
    fn test_calendar_empty_keeps_heading() {
        let empty = ApiResponse::Payload(json!([]));
        let report = DividendsCalendarTool::render(Some("2025-06-01"), Some("2025-07-01"), &empty);
        assert!(report.starts_with("# Dividend Calendar: 2025-06-01 to 2025-07-01"));
        assert!(report.contains("No dividend events found"));
    }

    #[test]
    fn test_calendar_without_range() {
        let empty = ApiResponse::Payload(json!([]));
        let report = DividendsCalendarTool::render(None, None, &empty);
        assert!(report.starts_with("# Dividend Calendar\n"));
    }
}
