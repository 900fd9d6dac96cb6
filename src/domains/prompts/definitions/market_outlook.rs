//! Market outlook prompt definition.

use super::{PromptDefinition, optional_arg};
use rmcp::model::PromptArgument;

/// Broad market review prompt.
pub struct MarketOutlookPrompt;

impl PromptDefinition for MarketOutlookPrompt {
    const NAME: &'static str = "market_outlook";
    const DESCRIPTION: &'static str = "Summarize the current market outlook";

    fn template() -> &'static str {
        r#"Please assess the current state of the market.

Gather:
1. Major index quotes (get_index_quote for ^GSPC, ^DJI, ^IXIC)
2. Today's biggest gainers and losers (get_biggest_gainers, get_biggest_losers)
3. The most active stocks (get_most_active)

{{#if focus}}
Give extra attention to: {{focus}}
{{else}}
Cover the broad market.
{{/if}}

Summarize the day's tone, notable sector moves, and what the breadth of
gainers vs. losers suggests about near-term sentiment."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![optional_arg(
            "focus",
            "Area to emphasize (e.g., tech, energy, small caps)",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        assert_eq!(MarketOutlookPrompt::NAME, "market_outlook");
        let args = MarketOutlookPrompt::arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].required, Some(false));
    }
}
