//! Company analysis prompt definition.

use super::{PromptDefinition, optional_arg, required_arg};
use rmcp::model::PromptArgument;

/// Guided fundamental analysis of a single company.
pub struct CompanyAnalysisPrompt;

impl PromptDefinition for CompanyAnalysisPrompt {
    const NAME: &'static str = "company_analysis";
    const DESCRIPTION: &'static str =
        "Analyze a company's profile, financials, and market position";

    fn template() -> &'static str {
        r#"Please analyze {{symbol}} as a potential investment.

Use the available tools to gather:
1. The company profile (get_company_profile)
2. The current quote (get_quote)
3. Financial ratios (get_financial_ratios)
4. The latest income statement (get_income_statement)

{{#if focus}}
Pay particular attention to: {{focus}}
{{/if}}

Then summarize:
- What the company does and its competitive position
- Financial health: profitability, liquidity, and leverage
- Current valuation relative to fundamentals
- Key risks an investor should weigh"#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg("symbol", "Stock ticker symbol to analyze (e.g., AAPL)"),
            optional_arg(
                "focus",
                "Specific aspect to emphasize (e.g., valuation, growth, debt)",
            ),
        ]
    }
}
