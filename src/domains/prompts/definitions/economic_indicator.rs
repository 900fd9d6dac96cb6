//! Economic indicator analysis prompt definition.

use super::{PromptDefinition, optional_arg, required_arg};
use rmcp::model::PromptArgument;

/// Macro-indicator interpretation prompt.
pub struct EconomicIndicatorPrompt;

impl PromptDefinition for EconomicIndicatorPrompt {
    const NAME: &'static str = "economic_indicator_analysis";
    const DESCRIPTION: &'static str =
        "Interpret an economic indicator and its market implications";

    fn template() -> &'static str {
        r#"Please analyze the {{indicator}} indicator and its implications for markets.

{{#if region}}
Limit the analysis to: {{region}}
{{/if}}

Use index quotes (get_index_quote), forex rates (get_forex_quote), and
commodity prices (get_commodities_prices) as cross-checks on how markets
are pricing the indicator.

Explain what the indicator measures, how its current direction typically
affects equities, rates, and currencies, and which sectors are most
sensitive to it."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg(
                "indicator",
                "Economic indicator to analyze (e.g., CPI, unemployment, GDP)",
            ),
            optional_arg("region", "Region or economy to focus on (e.g., US, eurozone)"),
        ]
    }
}
