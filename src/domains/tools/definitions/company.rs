//! Company information tools.
//!
//! Tools covering the Company section of the Financial Modeling Prep API:
//! company profile and outstanding company notes.

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

use super::common::{self, field, format_currency, format_number, format_percent, num, text, text_or};

/// Parameters for the company tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyParams {
    /// Stock ticker symbol.
    #[schemars(description = "Stock ticker symbol (e.g., AAPL, MSFT, TSLA)")]
    pub symbol: String,
}

/// Company profile tool.
#[derive(Debug, Clone)]
pub struct CompanyProfileTool;

impl CompanyProfileTool {
    pub const NAME: &'static str = "get_company_profile";

    pub const DESCRIPTION: &'static str =
        "Get a company's profile: sector, industry, leadership, market cap, \
         valuation metrics, and business description.";

    pub async fn execute(client: &FmpClient, params: &CompanyParams) -> String {
        info!(symbol = %params.symbol, "fetching company profile");
        let data = client
            .get("profile", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let profile = match data {
            ApiResponse::Error(envelope) => {
                return format!("Error fetching profile for {symbol}: {}", envelope.message);
            }
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No profile data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![
            format!(
                "# {} ({})",
                text_or(profile, "companyName", "Unknown Company"),
                text_or(profile, "symbol", symbol)
            ),
            format!("**Sector**: {}", text_or(profile, "sector", "N/A")),
            format!("**Industry**: {}", text_or(profile, "industry", "N/A")),
            format!("**CEO**: {}", text_or(profile, "ceo", "N/A")),
            format!("**Exchange**: {}", text_or(profile, "exchange", "N/A")),
            format!("**Country**: {}", text_or(profile, "country", "N/A")),
            format!("**Website**: {}", text_or(profile, "website", "N/A")),
            String::new(),
            "## Financial Overview".to_string(),
            format!(
                "**Market Cap**: {}",
                format_currency(field(profile, "marketCap"))
            ),
            format!("**Price**: {}", format_currency(field(profile, "price"))),
            format!("**Beta**: {}", format_number(field(profile, "beta"))),
            format!(
                "**Average Volume**: {}",
                format_number(field(profile, "averageVolume"))
            ),
            format!(
                "**Last Dividend**: {}",
                format_currency(field(profile, "lastDividend"))
            ),
            String::new(),
            "## Key Metrics".to_string(),
            format!("**P/E Ratio**: {}", format_number(field(profile, "pe"))),
            format!("**EPS**: {}", format_currency(field(profile, "eps"))),
            format!(
                "**Dividend Yield**: {}",
                format_percent(num(profile, "dividendYield"))
            ),
        ];

        if let Some(description) = text(profile, "description") {
            lines.push(String::new());
            lines.push("## About".to_string());
            lines.push(description.to_string());
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CompanyParams>(),
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
        common::markdown_route(Self::to_tool(), client, |client, params: CompanyParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

/// Company notes tool.
#[derive(Debug, Clone)]
pub struct CompanyNotesTool;

impl CompanyNotesTool {
    pub const NAME: &'static str = "get_company_notes";

    pub const DESCRIPTION: &'static str =
        "List the notes (debt instruments) a company has registered, with \
         maturity dates and interest rates where available.";

    pub async fn execute(client: &FmpClient, params: &CompanyParams) -> String {
        info!(symbol = %params.symbol, "fetching company notes");
        let data = client
            .get("company-notes", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let notes = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching company notes for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No company notes data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![
            format!("# Company Notes for {symbol}"),
            String::new(),
            "| Title | CIK | Exchange |".to_string(),
            "|-------|-----|----------|".to_string(),
        ];

        for note in notes {
            lines.push(format!(
                "| {} | {} | {} |",
                text_or(note, "title", "Unknown"),
                text_or(note, "cik", "N/A"),
                text_or(note, "exchange", "N/A")
            ));
        }

        lines.push(String::new());
        lines.push("## Detailed Note Information".to_string());

        for note in notes {
            lines.push(String::new());
            lines.push(format!("### {}", text_or(note, "title", "Unknown")));
            Self::push_detail(&mut lines, note, "maturityDate", "Maturity Date");
            if let Some(rate) = num(note, "interestRate") {
                lines.push(format!("**Interest Rate**: {}", format_percent(Some(rate))));
            }
            if let Some(description) = text(note, "description") {
                lines.push(description.to_string());
            }
        }

        lines.join("\n")
    }

    fn push_detail(lines: &mut Vec<String>, note: &Value, key: &str, label: &str) {
        if let Some(value) = text(note, key) {
            lines.push(format!("**{label}**: {value}"));
        }
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CompanyParams>(),
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
        common::markdown_route(Self::to_tool(), client, |client, params: CompanyParams| {
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
    fn test_profile_render() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "AAPL",
            "companyName": "Apple Inc.",
            "sector": "Technology",
            "industry": "Consumer Electronics",
            "ceo": "Tim Cook",
            "exchange": "NASDAQ",
            "country": "US",
            "website": "https://www.apple.com",
            "marketCap": 2840000000000_i64,
            "price": 178.72,
            "beta": 1.28,
            "averageVolume": 58000000,
            "lastDividend": 0.96,
            "pe": 29.5,
            "eps": 6.05,
            "dividendYield": 0.54,
            "description": "Apple Inc. designs, manufactures and markets smartphones."
        }]));
        let report = CompanyProfileTool::render("AAPL", &data);
        assert!(report.contains("# Apple Inc. (AAPL)"));
        assert!(report.contains("**Sector**: Technology"));
        assert!(report.contains("**CEO**: Tim Cook"));
        assert!(report.contains("**Market Cap**: $2,840,000,000,000"));
        assert!(report.contains("## Financial Overview"));
        assert!(report.contains("## Key Metrics"));
        assert!(report.contains("**P/E Ratio**: 29.50"));
        assert!(report.contains("**EPS**: $6.05"));
    }

    #[test]
    fn test_profile_missing_fields_render_na() {
        let data = ApiResponse::Payload(json!([{"symbol": "AAPL"}]));
        let report = CompanyProfileTool::render("AAPL", &data);
        assert!(report.contains("**Sector**: N/A"));
        assert!(report.contains("**P/E Ratio**: N/A"));
        assert!(!report.contains("## About"));
    }

    #[test]
    fn test_profile_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::ConnectionError, "Failed to fetch data");
        assert_eq!(
            CompanyProfileTool::render("AAPL", &error),
            "Error fetching profile for AAPL: Failed to fetch data"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            CompanyProfileTool::render("AAPL", &empty),
            "No profile data found for symbol AAPL"
        );
    }

    #[test]
    fn test_notes_render() {
        let data = ApiResponse::Payload(json!([
            {
                "cik": "0000320193",
                "symbol": "AAPL",
                "title": "Apple Inc. 3.85% Notes due 2043",
                "exchange": "NASDAQ",
                "maturityDate": "2043-08-05",
                "interestRate": 3.85,
                "description": "3.85% unsecured senior notes"
            },
            {
                "cik": "0000320193",
                "symbol": "AAPL",
                "title": "Apple Inc. 2.40% Notes due 2030",
                "exchange": "NASDAQ"
            }
        ]));
        let report = CompanyNotesTool::render("AAPL", &data);
        assert!(report.contains("# Company Notes for AAPL"));
        assert!(report.contains("| Title | CIK | Exchange |"));
        assert!(report.contains("Apple Inc. 3.85% Notes due 2043"));
        assert!(report.contains("Apple Inc. 2.40% Notes due 2030"));
        assert!(report.contains("## Detailed Note Information"));
        assert!(report.contains("**Maturity Date**: 2043-08-05"));
        assert!(report.contains("**Interest Rate**: 3.85%"));
        assert!(report.contains("3.85% unsecured senior notes"));
    }

    #[test]
    fn test_notes_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::HttpError, "Failed to fetch data");
        assert_eq!(
            CompanyNotesTool::render("AAPL", &error),
            "Error fetching company notes for AAPL: Failed to fetch data"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            CompanyNotesTool::render("AAPL", &empty),
            "No company notes data found for symbol AAPL"
        );
    }

    #[test]
    fn test_notes_row_count_matches_records() {
        let data = ApiResponse::Payload(json!([
            {"title": "Note A", "cik": "1", "exchange": "NASDAQ"},
            {"title": "Note B", "cik": "2", "exchange": "NASDAQ"},
            {"title": "Note C", "cik": "3", "exchange": "NASDAQ"}
        ]));
        let report = CompanyNotesTool::render("AAPL", &data);
        let table_rows = report
            .lines()
            .filter(|l| l.starts_with("| Note"))
            .count();
        assert_eq!(table_rows, 3);
    }
}
