//! Prompt definitions module.
//!
//! Each prompt is defined in its own file with:
//! - Metadata (name, description, arguments)
//! - Template string
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export it here
//! 4. Register it in `registry.rs`

use rmcp::model::PromptArgument;

pub mod company_analysis;
pub mod economic_indicator;
pub mod financial_statement_analysis;
pub mod investment_idea;
pub mod market_outlook;
pub mod stock_comparison;
pub mod technical_analysis;

pub use company_analysis::CompanyAnalysisPrompt;
pub use economic_indicator::EconomicIndicatorPrompt;
pub use financial_statement_analysis::FinancialStatementAnalysisPrompt;
pub use investment_idea::InvestmentIdeaPrompt;
pub use market_outlook::MarketOutlookPrompt;
pub use stock_comparison::StockComparisonPrompt;
pub use technical_analysis::TechnicalAnalysisPrompt;

/// Trait for prompt definitions.
///
/// Each prompt must implement this trait to provide its metadata and template.
pub trait PromptDefinition {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// The template string with {{variable}} placeholders.
    fn template() -> &'static str;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument>;
}

/// Shorthand for building a required argument.
pub(crate) fn required_arg(name: &str, description: &str) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(true),
    }
}

/// Shorthand for building an optional argument.
pub(crate) fn optional_arg(name: &str, description: &str) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(false),
    }
}
