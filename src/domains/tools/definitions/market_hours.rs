//! Market hours tools.
//!
//! Exchange opening hours and holiday schedules.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::core::api::{ApiResponse, FmpClient};

use super::common::{self, format_date_long, text_or, timestamp_line};

fn default_exchange() -> String {
    "NASDAQ".to_string()
}

fn default_holiday_exchange() -> String {
    "US".to_string()
}

/// Parameters for the market hours tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MarketHoursParams {
    /// Exchange code.
    #[schemars(description = "Exchange code (e.g., NASDAQ, NYSE, LSE)")]
    #[serde(default = "default_exchange")]
    pub exchange: String,
}

/// Parameters for the market holidays tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MarketHolidaysParams {
    /// Exchange code.
    #[schemars(description = "Exchange code (default: US)")]
    #[serde(default = "default_holiday_exchange")]
    pub exchange: String,
}

/// Current market hours status for an exchange.
#[derive(Debug, Clone)]
pub struct MarketHoursTool;

impl MarketHoursTool {
    pub const NAME: &'static str = "get_market_hours";

    pub const DESCRIPTION: &'static str =
        "Get the current open/closed status and weekly trading hours for a \
         stock exchange.";

    pub async fn execute(client: &FmpClient, params: &MarketHoursParams) -> String {
        info!(exchange = %params.exchange, "fetching market hours");
        let data = client
            .get(
                "exchange-market-hours",
                &[("exchange", params.exchange.clone())],
            )
            .await;
        Self::render(&params.exchange, &data)
    }

    pub fn render(exchange: &str, data: &ApiResponse) -> String {
        let hours = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching market hours information: {}",
                    envelope.message
                );
            }
            // The endpoint returns a single object; tolerate a one-element list.
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No market hours data found for exchange: {exchange}"),
            },
        };

        let is_open = hours
            .get("isOpen")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let (status_emoji, status_text) = if is_open {
            ("🟢", "Open")
        } else {
            ("🔴", "Closed")
        };

        let mut lines = vec![
            format!("# Market Hours for {exchange}"),
            timestamp_line(),
            String::new(),
            format!("## {status_emoji} Current Status: {status_text}"),
            String::new(),
            format!("- **Timezone**: {}", text_or(hours, "timezone", "Unknown")),
            format!(
                "- **Local Time**: {}",
                text_or(hours, "localTime", "Unknown")
            ),
            String::new(),
            "## Trading Hours".to_string(),
            String::new(),
            "| Day | Open | Close |".to_string(),
            "|-----|------|-------|".to_string(),
        ];

        for day in hours
            .get("marketHours")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
        {
            let name = text_or(day, "day", "Unknown");
            if day.get("isClosed").and_then(Value::as_bool).unwrap_or(false) {
                lines.push(format!("| {name} | Closed | Closed |"));
            } else {
                lines.push(format!(
                    "| {name} | {} | {} |",
                    text_or(day, "open", "Closed"),
                    text_or(day, "close", "Closed")
                ));
            }
        }

        let holidays = hours
            .get("closingDays")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if !holidays.is_empty() {
            lines.push(String::new());
            lines.push("## Upcoming Holidays".to_string());
            lines.push(String::new());
            lines.push("| Date | Holiday |".to_string());
            lines.push("|------|---------|".to_string());
            for holiday in holidays {
                lines.push(format!(
                    "| {} | {} |",
                    text_or(holiday, "date", "Unknown"),
                    text_or(holiday, "name", "Unknown")
                ));
            }
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MarketHoursParams>(),
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
            |client, params: MarketHoursParams| {
                Box::pin(async move { Self::execute(&client, &params).await })
            },
        )
    }
}

/// Market holiday schedule for an exchange.
#[derive(Debug, Clone)]
pub struct MarketHolidaysTool;

impl MarketHolidaysTool {
    pub const NAME: &'static str = "get_market_holidays";

    pub const DESCRIPTION: &'static str =
        "List market holidays for an exchange, grouped by year, with closed \
         and early-close days marked.";

    pub async fn execute(client: &FmpClient, params: &MarketHolidaysParams) -> String {
        info!(exchange = %params.exchange, "fetching market holidays");
        let data = client
            .get("market-holidays", &[("exchange", params.exchange.clone())])
            .await;
        Self::render(&params.exchange, &data)
    }

    pub fn render(exchange: &str, data: &ApiResponse) -> String {
        let holidays = match data {
            ApiResponse::Error(envelope) => {
                return format!("Error fetching market holidays: {}", envelope.message);
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No market holiday data found for exchange: {exchange}"),
            },
        };

        let mut lines = vec![
            format!("# Market Holidays for {exchange} Exchange"),
            String::new(),
            "| Date | Holiday | Status | Exchange |".to_string(),
            "|------|---------|--------|----------|".to_string(),
        ];

        // Group chronologically by year; BTreeMap keeps years sorted.
        let mut by_year: BTreeMap<i32, Vec<&Value>> = BTreeMap::new();
        for holiday in holidays {
            let year = NaiveDate::parse_from_str(text_or(holiday, "date", ""), "%Y-%m-%d")
                .map(|d| d.year())
                .unwrap_or(0);
            by_year.entry(year).or_default().push(holiday);
        }

        for (year, entries) in by_year {
            if year > 0 {
                lines.push(format!("### {year} Holidays"));
            }
            for holiday in entries {
                let status = text_or(holiday, "status", "Unknown");
                let status_label = match status.to_lowercase().as_str() {
                    "closed" => "🔴 Closed".to_string(),
                    "early close" | "early closing" => "🟠 Early Close".to_string(),
                    _ => status.to_string(),
                };
                lines.push(format!(
                    "| {} | {} | {} | {} |",
                    format_date_long(text_or(holiday, "date", "Unknown")),
                    text_or(holiday, "name", "Unknown"),
                    status_label,
                    text_or(holiday, "exchange", "Unknown")
                ));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MarketHolidaysParams>(),
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
            |client, params: MarketHolidaysParams| {
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

    fn hours_payload() -> ApiResponse {
        ApiResponse::Payload(json!({
            "exchangeName": "NASDAQ",
            "isOpen": true,
            "timezone": "America/New_York",
            "localTime": "2023-05-03 15:30:45",
            "marketHours": [
                {"day": "Monday", "open": "09:30", "close": "16:00", "isClosed": false},
                {"day": "Saturday", "isClosed": true}
            ],
            "closingDays": [
                {"date": "2023-05-29", "name": "Memorial Day"}
            ]
        }))
    }

    #[test]
    fn test_market_hours_render() {
        let report = MarketHoursTool::render("NASDAQ", &hours_payload());
        assert!(report.contains("# Market Hours for NASDAQ"));
        assert!(report.contains("## 🟢 Current Status: Open"));
        assert!(report.contains("- **Timezone**: America/New_York"));
        assert!(report.contains("- **Local Time**: 2023-05-03 15:30:45"));
        assert!(report.contains("| Monday | 09:30 | 16:00 |"));
        assert!(report.contains("| Saturday | Closed | Closed |"));
        assert!(report.contains("## Upcoming Holidays"));
        assert!(report.contains("| 2023-05-29 | Memorial Day |"));
    }

    #[test]
    fn test_market_hours_closed_status() {
        let data = ApiResponse::Payload(json!({"isOpen": false, "marketHours": []}));
        let report = MarketHoursTool::render("LSE", &data);
        assert!(report.contains("## 🔴 Current Status: Closed"));
    }

    #[test]
    fn test_market_hours_accepts_single_element_list() {
        let data = ApiResponse::Payload(json!([{"isOpen": true, "marketHours": []}]));
        let report = MarketHoursTool::render("NYSE", &data);
        assert!(report.contains("## 🟢 Current Status: Open"));
    }

    #[test]
    fn test_market_hours_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::HttpError, "Exchange not found");
        assert_eq!(
            MarketHoursTool::render("INVALID", &error),
            "Error fetching market hours information: Exchange not found"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            MarketHoursTool::render("NYSE", &empty),
            "No market hours data found for exchange: NYSE"
        );
    }

    #[test]
    fn test_holidays_render_groups_by_year() {
        let data = ApiResponse::Payload(json!([
            {"date": "2023-01-02", "name": "New Year's Day (observed)", "status": "closed", "exchange": "US"},
            {"date": "2023-11-24", "name": "Thanksgiving Day", "status": "early close", "exchange": "US"},
            {"date": "2024-01-01", "name": "New Year's Day", "status": "closed", "exchange": "US"}
        ]));
        let report = MarketHolidaysTool::render("US", &data);
        assert!(report.contains("# Market Holidays for US Exchange"));
        assert!(report.contains("| Date | Holiday | Status | Exchange |"));
        assert!(report.contains("### 2023 Holidays"));
        assert!(report.contains("### 2024 Holidays"));
        assert!(report.contains("| January 02, 2023 | New Year's Day (observed) | 🔴 Closed | US |"));
        assert!(report.contains("| November 24, 2023 | Thanksgiving Day | 🟠 Early Close | US |"));
    }

    #[test]
    fn test_holidays_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::HttpError, "Exchange not found");
        assert_eq!(
            MarketHolidaysTool::render("INVALID", &error),
            "Error fetching market holidays: Exchange not found"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            MarketHolidaysTool::render("US", &empty),
            "No market holiday data found for exchange: US"
        );
    }
}
