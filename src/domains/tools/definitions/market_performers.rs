//! Market performer tools.
//!
//! Most active stocks, biggest gainers, and biggest losers, ranked.

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
    self, change_emoji, default_limit, field, format_currency, format_number, format_percent,
    num, text_or, timestamp_line, validate_limit,
};

/// Parameters for the market performer tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PerformersParams {
    /// Maximum number of stocks to return.
    #[schemars(description = "Maximum number of stocks to return (default: 10, max: 100)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Render a ranked performers table shared by the three tools.
fn render_ranked(title: &str, what: &str, limit: usize, data: &ApiResponse) -> String {
    let stocks = match data {
        ApiResponse::Error(envelope) => {
            return format!("Error fetching {what}: {}", envelope.message);
        }
        _ => match data.records() {
            Some(records) if !records.is_empty() => records,
            _ => return format!("No data found for {what}"),
        },
    };

    let mut lines = vec![
        format!("# Top {limit} {title}"),
        timestamp_line(),
        String::new(),
        "| Rank | Symbol | Company | Price | Change | Change % | Volume |".to_string(),
        "|------|--------|---------|-------|--------|----------|--------|".to_string(),
    ];

    for (rank, stock) in stocks.iter().take(limit).enumerate() {
        let change = num(stock, "change").unwrap_or(0.0);
        lines.push(format!(
            "| {} | {} | {} | {} | {} {} | {} | {} |",
            rank + 1,
            text_or(stock, "symbol", "N/A"),
            text_or(stock, "name", "N/A"),
            format_currency(field(stock, "price")),
            change_emoji(change),
            format_currency(field(stock, "change")),
            format_percent(num(stock, "changesPercentage")),
            format_number(field(stock, "volume"))
        ));
    }

    lines.join("\n")
}

fn ranked_tool(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<PerformersParams>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Most actively traded stocks.
#[derive(Debug, Clone)]
pub struct MostActiveTool;

impl MostActiveTool {
    pub const NAME: &'static str = "get_most_active";

    pub const DESCRIPTION: &'static str =
        "Get the most actively traded stocks in the market, ranked by volume.";

    pub async fn execute(client: &FmpClient, params: &PerformersParams) -> String {
        let limit = validate_limit(params.limit);
        info!(limit, "fetching most active stocks");
        let data = client.get("most-actives", &[]).await;
        Self::render(limit, &data)
    }

    pub fn render(limit: usize, data: &ApiResponse) -> String {
        render_ranked("Most Active Stocks", "most active stocks", limit, data)
    }

    pub fn to_tool() -> Tool {
        ranked_tool(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<FmpClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        common::markdown_route(
            Self::to_tool(),
            client,
            |client, params: PerformersParams| {
                Box::pin(async move { Self::execute(&client, &params).await })
            },
        )
    }
}

/// Biggest gaining stocks of the day.
#[derive(Debug, Clone)]
pub struct BiggestGainersTool;

impl BiggestGainersTool {
    pub const NAME: &'static str = "get_biggest_gainers";

    pub const DESCRIPTION: &'static str =
        "Get the stocks with the largest percentage gains today.";

    pub async fn execute(client: &FmpClient, params: &PerformersParams) -> String {
        let limit = validate_limit(params.limit);
        info!(limit, "fetching biggest gainers");
        let data = client.get("biggest-gainers", &[]).await;
        Self::render(limit, &data)
    }

    pub fn render(limit: usize, data: &ApiResponse) -> String {
        render_ranked("Biggest Gainers", "biggest gainers", limit, data)
    }

    pub fn to_tool() -> Tool {
        ranked_tool(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<FmpClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        common::markdown_route(
            Self::to_tool(),
            client,
            |client, params: PerformersParams| {
                Box::pin(async move { Self::execute(&client, &params).await })
            },
        )
    }
}

/// Biggest losing stocks of the day.
#[derive(Debug, Clone)]
pub struct BiggestLosersTool;

impl BiggestLosersTool {
    pub const NAME: &'static str = "get_biggest_losers";

    pub const DESCRIPTION: &'static str =
        "Get the stocks with the largest percentage losses today.";

    pub async fn execute(client: &FmpClient, params: &PerformersParams) -> String {
        let limit = validate_limit(params.limit);
        info!(limit, "fetching biggest losers");
        let data = client.get("biggest-losers", &[]).await;
        Self::render(limit, &data)
    }

    pub fn render(limit: usize, data: &ApiResponse) -> String {
        render_ranked("Biggest Losers", "biggest losers", limit, data)
    }

    pub fn to_tool() -> Tool {
        ranked_tool(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(client: Arc<FmpClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        common::markdown_route(
            Self::to_tool(),
            client,
            |client, params: PerformersParams| {
                Box::pin(async move { Self::execute(&client, &params).await })
            },
        )
    }
}
