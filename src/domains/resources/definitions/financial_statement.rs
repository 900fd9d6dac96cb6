//! Financial statement resource definition.
//!
//! `financial-statement://{symbol}/{statement_type}/{period}` resolves to
//! the matching statement report. Statement types are `income`, `balance`,
//! and `cashflow`; periods are `annual` and `quarter`.

use crate::core::api::FmpClient;
use crate::domains::resources::error::ResourceError;
use crate::domains::tools::definitions::{
    BalanceSheetTool, CashFlowTool, IncomeStatementTool, StatementParams,
};

use super::ResourceDefinition;

/// Financial statements addressed by symbol, type, and period.
pub struct FinancialStatementResource;

impl ResourceDefinition for FinancialStatementResource {
    const URI_TEMPLATE: &'static str = "financial-statement://{symbol}/{statement_type}/{period}";
    const NAME: &'static str = "Financial Statement";
    const DESCRIPTION: &'static str =
        "Income statement, balance sheet, or cash flow statement for a symbol \
         (statement types: income, balance, cashflow; periods: annual, quarter)";
    const MIME_TYPE: &'static str = "text/markdown";
}

impl FinancialStatementResource {
    /// Fetch and render the requested statement.
    pub async fn read(
        client: &FmpClient,
        symbol: &str,
        statement_type: &str,
        period: &str,
    ) -> Result<String, ResourceError> {
        if !matches!(period, "annual" | "quarter") {
            return Err(ResourceError::invalid_uri(format!(
                "unknown period '{period}' (expected 'annual' or 'quarter')"
            )));
        }

        let params = StatementParams {
            symbol: symbol.to_string(),
            period: period.to_string(),
            limit: 1,
        };

        match statement_type {
            "income" => Ok(IncomeStatementTool::execute(client, &params).await),
            "balance" => Ok(BalanceSheetTool::execute(client, &params).await),
            "cashflow" => Ok(CashFlowTool::execute(client, &params).await),
            other => Err(ResourceError::invalid_uri(format!(
                "unknown statement type '{other}' (expected 'income', 'balance', or 'cashflow')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;

    #[test]
    fn test_rejects_unknown_statement_type() {
        let client = FmpClient::new(&ApiConfig::default()).unwrap();
        let result = tokio_test::block_on(FinancialStatementResource::read(
            &client, "AAPL", "equity", "annual",
        ));
        assert!(matches!(result, Err(ResourceError::InvalidUri(_))));
    }

    #[test]
    fn test_rejects_unknown_period() {
        let client = FmpClient::new(&ApiConfig::default()).unwrap();
        let result = tokio_test::block_on(FinancialStatementResource::read(
            &client, "AAPL", "income", "weekly",
        ));
        assert!(matches!(result, Err(ResourceError::InvalidUri(_))));
    }
}
