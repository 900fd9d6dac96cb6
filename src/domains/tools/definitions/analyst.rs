//! Analyst coverage tools.
//!
//! Ratings snapshots and the latest price target announcements.

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
    self, default_limit, field, format_currency, format_number, format_percent, num, text,
    text_or, timestamp_line, validate_limit,
};

/// Parameters for the ratings snapshot tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RatingsParams {
    /// Stock ticker symbol.
    #[schemars(description = "Stock ticker symbol (e.g., AAPL, MSFT, TSLA)")]
    pub symbol: String,
}

/// Parameters for the price target news tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PriceTargetNewsParams {
    /// Result page to fetch.
    #[schemars(description = "Result page to fetch (default: 0)")]
    #[serde(default)]
    pub page: usize,

    /// Maximum number of announcements to return.
    #[schemars(description = "Maximum number of announcements (default: 10, max: 100)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Component score labels, in display order.
const COMPONENT_SCORES: [(&str, &str); 6] = [
    ("discountedCashFlowScore", "Discounted Cash Flow Score"),
    ("returnOnEquityScore", "Return on Equity Score"),
    ("returnOnAssetsScore", "Return on Assets Score"),
    ("debtToEquityScore", "Debt to Equity Score"),
    ("priceToEarningsScore", "Price to Earnings Score"),
    ("priceToBookScore", "Price to Book Score"),
];

/// Analyst ratings snapshot tool.
#[derive(Debug, Clone)]
pub struct RatingsSnapshotTool;

impl RatingsSnapshotTool {
    pub const NAME: &'static str = "get_ratings_snapshot";

    pub const DESCRIPTION: &'static str =
        "Get the analyst rating snapshot for a company: the composite rating \
         and its component scores.";

    pub async fn execute(client: &FmpClient, params: &RatingsParams) -> String {
        info!(symbol = %params.symbol, "fetching ratings snapshot");
        let data = client
            .get("ratings-snapshot", &[("symbol", params.symbol.clone())])
            .await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let rating = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching ratings for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No ratings data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![
            format!("# Analyst Ratings for {}", text_or(rating, "symbol", symbol)),
            timestamp_line(),
            String::new(),
            format!("**Rating**: {}", text_or(rating, "rating", "N/A")),
            format!(
                "**Overall Score**: {}",
                format_number(field(rating, "overallScore"))
            ),
            String::new(),
            "## Component Scores".to_string(),
        ];

        for (key, label) in COMPONENT_SCORES {
            lines.push(format!(
                "**{label}**: {}",
                format_number(field(rating, key))
            ));
        }

        lines.push(String::new());
        lines.push("## Rating System Explanation".to_string());
        lines.push(
            "Ratings are graded on a scale of A+ to F, where A+ indicates the \
             strongest composite of the component scores above and F the weakest. \
             Each component score ranges from 1 (weak) to 5 (strong)."
                .to_string(),
        );

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RatingsParams>(),
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
        common::markdown_route(Self::to_tool(), client, |client, params: RatingsParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

/// Latest price target announcements tool.
#[derive(Debug, Clone)]
pub struct PriceTargetNewsTool;

impl PriceTargetNewsTool {
    pub const NAME: &'static str = "get_price_target_latest_news";

    pub const DESCRIPTION: &'static str =
        "Get the latest analyst price target announcements across the market, \
         with the action taken and a link to the source article.";

    pub async fn execute(client: &FmpClient, params: &PriceTargetNewsParams) -> String {
        let limit = validate_limit(params.limit);
        info!(page = params.page, limit, "fetching price target news");
        let data = client
            .get(
                "price-target-latest-news",
                &[
                    ("page", params.page.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await;
        Self::render(&data)
    }

    pub fn render(data: &ApiResponse) -> String {
        let announcements = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching price target announcements: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return "No price target announcements found".to_string(),
            },
        };

        let mut lines = vec![
            "# Latest Price Target Announcements".to_string(),
            timestamp_line(),
            String::new(),
            "| Symbol | Company | Action | Price Target | Stock Price | Change (%) | Analyst | Date |"
                .to_string(),
            "|--------|---------|--------|--------------|-------------|------------|---------|------|"
                .to_string(),
        ];

        for item in announcements {
            let change = Self::target_change_percent(item);
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |",
                text_or(item, "symbol", "N/A"),
                text_or(item, "companyName", "N/A"),
                Self::action_label(item),
                format_currency(field(item, "priceTarget")),
                format_currency(field(item, "priceWhenPosted")),
                format_percent(change),
                text_or(item, "analystName", "N/A"),
                text_or(item, "publishedDate", "N/A")
            ));
        }

        lines.push(String::new());
        lines.push("## Detailed Announcements".to_string());

        for item in announcements {
            lines.push(String::new());
            lines.push(format!(
                "### {} - {}",
                text_or(item, "symbol", "N/A"),
                text_or(item, "analystCompany", "Unknown Firm")
            ));
            lines.push(format!(
                "**Price Target**: {}",
                format_currency(field(item, "priceTarget"))
            ));
            if let (Some(title), Some(url)) = (text(item, "newsTitle"), text(item, "newsURL")) {
                lines.push(format!(
                    "**Source**: [{title}]({url}) ({})",
                    text_or(item, "newsPublisher", "Unknown")
                ));
            }
        }

        lines.join("\n")
    }

    /// Derive the action marker by comparing the target to the posted price.
    fn action_label(item: &Value) -> String {
        let target = num(item, "priceTarget");
        let adj_previous = num(item, "adjPriceTarget").filter(|v| *v > 0.0);
        match (target, adj_previous) {
            (Some(t), Some(prev)) if t > prev => "⬆️ Increase".to_string(),
            (Some(t), Some(prev)) if t < prev => "⬇️ Decrease".to_string(),
            (Some(_), Some(_)) => "➡️ Maintain".to_string(),
            (Some(_), None) => "🆕 New".to_string(),
            _ => "📊 Update".to_string(),
        }
    }

    /// Percentage distance from the stock price when posted to the target.
    fn target_change_percent(item: &Value) -> Option<f64> {
        let target = num(item, "priceTarget")?;
        let posted = num(item, "priceWhenPosted").filter(|v| *v > 0.0)?;
        Some((target - posted) / posted * 100.0)
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PriceTargetNewsParams>(),
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
            |client, params: PriceTargetNewsParams| {
                Box::pin(async move { Self::execute(&client, &params).await })
            },
        )
    }
}
