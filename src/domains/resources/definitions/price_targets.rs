//! Price targets resource definition.
//!
//! `price-targets://{symbol}` resolves to the analyst price target
//! consensus for a symbol.

use crate::core::api::{ApiResponse, FmpClient};
use crate::domains::tools::definitions::common::{field, format_currency};

use super::ResourceDefinition;

/// Analyst price target consensus addressed by symbol.
pub struct PriceTargetsResource;

impl ResourceDefinition for PriceTargetsResource {
    const URI_TEMPLATE: &'static str = "price-targets://{symbol}";
    const NAME: &'static str = "Price Targets";
    const DESCRIPTION: &'static str =
        "Analyst price target consensus (high, low, median) for a symbol";
    const MIME_TYPE: &'static str = "text/markdown";
}

impl PriceTargetsResource {
    /// Fetch and render the price target consensus for `symbol`.
    pub async fn read(client: &FmpClient, symbol: &str) -> String {
        let data = client
            .get("price-target-consensus", &[("symbol", symbol.to_string())])
            .await;
        Self::render(symbol, &data)
    }

    fn render(symbol: &str, data: &ApiResponse) -> String {
        let consensus = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching price targets for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.first_record() {
                Some(record) => record,
                None => return format!("No price target data found for symbol {symbol}"),
            },
        };

        [
            format!("# Price Target Consensus for {symbol}"),
            String::new(),
            format!(
                "**Target High**: {}",
                format_currency(field(consensus, "targetHigh"))
            ),
            format!(
                "**Target Low**: {}",
                format_currency(field(consensus, "targetLow"))
            ),
            format!(
                "**Target Consensus**: {}",
                format_currency(field(consensus, "targetConsensus"))
            ),
            format!(
                "**Target Median**: {}",
                format_currency(field(consensus, "targetMedian"))
            ),
        ]
        .join("\n")
    }
}
