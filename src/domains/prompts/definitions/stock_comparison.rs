//! Stock comparison prompt definition.

use super::{PromptDefinition, optional_arg, required_arg};
use rmcp::model::PromptArgument;

/// Side-by-side comparison of several stocks.
pub struct StockComparisonPrompt;

impl PromptDefinition for StockComparisonPrompt {
    const NAME: &'static str = "stock_comparison";
    const DESCRIPTION: &'static str = "Compare multiple stocks side by side";

    fn template() -> &'static str {
        r#"Please compare the following stocks: {{symbols}}

For each symbol, gather:
1. The current quote (get_quote)
2. The company profile (get_company_profile)
3. Financial ratios (get_financial_ratios)

{{#if focus}}
Rank them primarily by: {{focus}}
{{/if}}

Present a comparison table of valuation, profitability, and momentum,
then state which stock looks most attractive and why."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg(
                "symbols",
                "Comma-separated ticker symbols to compare (e.g., AAPL, MSFT, GOOGL)",
            ),
            optional_arg("focus", "Primary comparison criterion (e.g., valuation, growth)"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        assert_eq!(StockComparisonPrompt::NAME, "stock_comparison");
        assert!(StockComparisonPrompt::template().contains("{{symbols}}"));
        assert_eq!(StockComparisonPrompt::arguments().len(), 2);
    }
}
