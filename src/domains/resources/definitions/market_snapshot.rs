//! Market snapshot resource definition.
//!
//! `market-snapshot://current` combines the day's most active stocks,
//! biggest gainers, and biggest losers into one report.

use crate::core::api::FmpClient;
use crate::domains::tools::definitions::common::timestamp_line;
use crate::domains::tools::definitions::{BiggestGainersTool, BiggestLosersTool, MostActiveTool};

use super::ResourceDefinition;

/// Number of entries shown per section.
const SECTION_LIMIT: usize = 5;

/// Current market snapshot.
pub struct MarketSnapshotResource;

impl ResourceDefinition for MarketSnapshotResource {
    const URI_TEMPLATE: &'static str = "market-snapshot://current";
    const NAME: &'static str = "Market Snapshot";
    const DESCRIPTION: &'static str =
        "Current market movers: most active stocks, biggest gainers, and biggest losers";
    const MIME_TYPE: &'static str = "text/markdown";
}

impl MarketSnapshotResource {
    /// Fetch the three mover lists and combine them into one report.
    pub async fn read(client: &FmpClient) -> String {
        let actives = client.get("most-actives", &[]).await;
        let gainers = client.get("biggest-gainers", &[]).await;
        let losers = client.get("biggest-losers", &[]).await;

        [
            "# Market Snapshot".to_string(),
            timestamp_line(),
            String::new(),
            MostActiveTool::render(SECTION_LIMIT, &actives),
            String::new(),
            BiggestGainersTool::render(SECTION_LIMIT, &gainers),
            String::new(),
            BiggestLosersTool::render(SECTION_LIMIT, &losers),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        assert_eq!(
            MarketSnapshotResource::URI_TEMPLATE,
            "market-snapshot://current"
        );
        assert_eq!(MarketSnapshotResource::MIME_TYPE, "text/markdown");
    }
}
