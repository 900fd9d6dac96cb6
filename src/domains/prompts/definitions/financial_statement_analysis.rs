//! Financial statement analysis prompt definition.

use super::{PromptDefinition, optional_arg, required_arg};
use rmcp::model::PromptArgument;

/// Guided walk-through of a company's statements.
pub struct FinancialStatementAnalysisPrompt;

impl PromptDefinition for FinancialStatementAnalysisPrompt {
    const NAME: &'static str = "financial_statement_analysis";
    const DESCRIPTION: &'static str =
        "Analyze a company's financial statements in depth";

    fn template() -> &'static str {
        r#"Please perform a financial statement analysis of {{symbol}}.

Gather the {{#if period}}{{period}}{{else}}annual{{/if}} statements:
1. Income statement (get_income_statement)
2. Balance sheet (get_balance_sheet)
3. Cash flow statement (get_cash_flow)

{{#if statement_type}}
Concentrate on the {{statement_type}} statement.
{{/if}}

Cover:
- Revenue and margin trends
- Asset quality and capital structure
- Cash generation vs. reported earnings
- Red flags in working capital or debt maturities"#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg("symbol", "Stock ticker symbol to analyze (e.g., AAPL)"),
            optional_arg(
                "statement_type",
                "Statement to emphasize: income, balance, or cashflow",
            ),
            optional_arg("period", "Reporting period: annual or quarter"),
        ]
    }
}
