//! Technical analysis prompt definition.

use super::{PromptDefinition, optional_arg, required_arg};
use rmcp::model::PromptArgument;

/// Price-action analysis prompt.
pub struct TechnicalAnalysisPrompt;

impl PromptDefinition for TechnicalAnalysisPrompt {
    const NAME: &'static str = "technical_analysis";
    const DESCRIPTION: &'static str =
        "Analyze a stock's price action and technical indicators";

    fn template() -> &'static str {
        r#"Please perform a technical analysis of {{symbol}}.

Gather:
1. Recent price history (get_historical_price_eod_light)
2. The EMA (get_ema{{#if timeframe}}, timeframe {{timeframe}}{{/if}})
3. Price changes across timeframes (get_quote_change)

Describe the prevailing trend, where price sits relative to the moving
average, notable support/resistance levels in the recent data, and what
the volume pattern suggests."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg("symbol", "Stock ticker symbol to analyze (e.g., AAPL)"),
            optional_arg("timeframe", "Candle timeframe (e.g., 1day, 1hour)"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        assert_eq!(TechnicalAnalysisPrompt::NAME, "technical_analysis");
        let args = TechnicalAnalysisPrompt::arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].required, Some(true));
    }
}
