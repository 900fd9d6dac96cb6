//! Investment idea generation prompt definition.

use super::{PromptDefinition, optional_arg};
use rmcp::model::PromptArgument;

/// Idea-generation prompt constrained by sector and risk profile.
pub struct InvestmentIdeaPrompt;

impl PromptDefinition for InvestmentIdeaPrompt {
    const NAME: &'static str = "investment_idea_generation";
    const DESCRIPTION: &'static str =
        "Generate investment ideas matching a sector and risk profile";

    fn template() -> &'static str {
        r#"Please generate investment ideas.

Constraints:
{{#if sector}}- Sector: {{sector}}{{else}}- Sector: any{{/if}}
{{#if risk_profile}}- Risk profile: {{risk_profile}}{{else}}- Risk profile: balanced{{/if}}
{{#if horizon}}- Time horizon: {{horizon}}{{/if}}

Start from today's market movers (get_most_active, get_biggest_gainers)
and validate each candidate with its profile (get_company_profile) and
ratios (get_financial_ratios).

Propose three ideas. For each, give the thesis in two sentences, the key
metric supporting it, and the main risk."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            optional_arg("sector", "Sector to search in (e.g., Technology, Energy)"),
            optional_arg(
                "risk_profile",
                "Risk tolerance: conservative, balanced, or aggressive",
            ),
            optional_arg("horizon", "Investment time horizon (e.g., 6 months, 5 years)"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        assert_eq!(InvestmentIdeaPrompt::NAME, "investment_idea_generation");
        let args = InvestmentIdeaPrompt::arguments();
        assert_eq!(args.len(), 3);
        assert!(args.iter().all(|a| a.required == Some(false)));
    }
}
