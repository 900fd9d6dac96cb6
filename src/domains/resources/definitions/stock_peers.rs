//! Stock peers resource definition.
//!
//! `stock-peers://{symbol}` resolves to a comparison table of companies in
//! the same sector and market-cap neighborhood.

use crate::core::api::{ApiResponse, FmpClient};
use crate::domains::tools::definitions::common::{field, format_currency, text_or};

use super::ResourceDefinition;

/// Peer companies addressed by symbol.
pub struct StockPeersResource;

impl ResourceDefinition for StockPeersResource {
    const URI_TEMPLATE: &'static str = "stock-peers://{symbol}";
    const NAME: &'static str = "Stock Peers";
    const DESCRIPTION: &'static str =
        "Companies comparable to a symbol by sector and market cap";
    const MIME_TYPE: &'static str = "text/markdown";
}

impl StockPeersResource {
    /// Fetch and render the peer list for `symbol`.
    pub async fn read(client: &FmpClient, symbol: &str) -> String {
        let data = client
            .get("stock-peers", &[("symbol", symbol.to_string())])
            .await;
        Self::render(symbol, &data)
    }

    fn render(symbol: &str, data: &ApiResponse) -> String {
        let peers = match data {
            ApiResponse::Error(envelope) => {
                return format!("Error fetching peers for {symbol}: {}", envelope.message);
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No peer data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![
            format!("# Peer Companies for {symbol}"),
            String::new(),
            "| Symbol | Company | Price | Market Cap |".to_string(),
            "|--------|---------|-------|------------|".to_string(),
        ];

        for peer in peers {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                text_or(peer, "symbol", "N/A"),
                text_or(peer, "companyName", "N/A"),
                format_currency(field(peer, "price")),
                format_currency(field(peer, "mktCap"))
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_table() {
        let data = ApiResponse::Payload(json!([
            {"symbol": "MSFT", "companyName": "Microsoft Corporation", "price": 460.36, "mktCap": 3420000000000_i64},
            {"symbol": "GOOGL", "companyName": "Alphabet Inc.", "price": 168.56, "mktCap": 2050000000000_i64}
        ]));
        let report = StockPeersResource::render("AAPL", &data);
        assert!(report.contains("# Peer Companies for AAPL"));
        assert!(report.contains("| MSFT | Microsoft Corporation | $460.36 | $3,420,000,000,000 |"));
        assert!(report.contains("| GOOGL |"));
    }

    #[test]
    fn test_render_empty() {
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            StockPeersResource::render("AAPL", &empty),
            "No peer data found for symbol AAPL"
        );
    }
}
