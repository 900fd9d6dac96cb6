//! Financial statement tools.
//!
//! Income statement, balance sheet, and cash flow statement reports, with
//! annual or quarterly periods.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::core::api::{ApiResponse, FmpClient};

use super::common::{self, field, format_currency, format_number, text_or, timestamp_line};

fn default_period() -> String {
    "annual".to_string()
}

fn default_statement_limit() -> usize {
    1
}

/// Parameters for the statement tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StatementParams {
    /// Stock ticker symbol.
    #[schemars(description = "Stock ticker symbol (e.g., AAPL, MSFT, TSLA)")]
    pub symbol: String,

    /// Reporting period.
    #[schemars(description = "Reporting period: 'annual' or 'quarter'")]
    #[serde(default = "default_period")]
    pub period: String,

    /// Number of periods to return.
    #[schemars(description = "Number of periods to return (default: 1)")]
    #[serde(default = "default_statement_limit")]
    pub limit: usize,
}

impl StatementParams {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("symbol", self.symbol.clone()),
            ("period", self.period.clone()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Push a `**label**: $value` line for a statement line item.
fn line_item(lines: &mut Vec<String>, record: &Value, key: &str, label: &str) {
    lines.push(format!("**{label}**: {}", format_currency(field(record, key))));
}

fn period_heading(record: &Value) -> String {
    let date = text_or(record, "date", "Unknown");
    let period = text_or(record, "period", "FY");
    format!("## Period: {date} ({period})")
}

/// Income statement tool.
#[derive(Debug, Clone)]
pub struct IncomeStatementTool;

impl IncomeStatementTool {
    pub const NAME: &'static str = "get_income_statement";

    pub const DESCRIPTION: &'static str =
        "Get a company's income statement: revenue, expenses, profitability, \
         taxes, and per-share results for one or more periods.";

    pub async fn execute(client: &FmpClient, params: &StatementParams) -> String {
        info!(symbol = %params.symbol, period = %params.period, "fetching income statement");
        let data = client.get("income-statement", &params.query()).await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let statements = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching income statement for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No income statement data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![format!("# Income Statement for {symbol}"), timestamp_line()];

        for statement in statements {
            lines.push(String::new());
            lines.push(period_heading(statement));
            lines.push(String::new());
            lines.push("### Revenue Metrics".to_string());
            line_item(&mut lines, statement, "revenue", "Revenue");
            line_item(&mut lines, statement, "costOfRevenue", "Cost of Revenue");
            line_item(&mut lines, statement, "grossProfit", "Gross Profit");
            lines.push(String::new());
            lines.push("### Expense Breakdown".to_string());
            line_item(
                &mut lines,
                statement,
                "researchAndDevelopmentExpenses",
                "Research & Development",
            );
            line_item(
                &mut lines,
                statement,
                "sellingGeneralAndAdministrativeExpenses",
                "Selling, General & Administrative",
            );
            line_item(&mut lines, statement, "operatingExpenses", "Operating Expenses");
            lines.push(String::new());
            lines.push("### Income and Profitability".to_string());
            line_item(&mut lines, statement, "operatingIncome", "Operating Income");
            line_item(&mut lines, statement, "ebitda", "EBITDA");
            line_item(&mut lines, statement, "incomeBeforeTax", "Income Before Tax");
            lines.push(String::new());
            lines.push("### Operating Metrics".to_string());
            line_item(&mut lines, statement, "interestIncome", "Interest Income");
            line_item(&mut lines, statement, "interestExpense", "Interest Expense");
            line_item(
                &mut lines,
                statement,
                "depreciationAndAmortization",
                "Depreciation & Amortization",
            );
            lines.push(String::new());
            lines.push("### Tax and Net Income".to_string());
            line_item(&mut lines, statement, "incomeTaxExpense", "Income Tax Expense");
            line_item(&mut lines, statement, "netIncome", "Net Income");
            lines.push(String::new());
            lines.push("### Per Share Data".to_string());
            line_item(&mut lines, statement, "eps", "EPS");
            line_item(&mut lines, statement, "epsDiluted", "EPS Diluted");
            lines.push(format!(
                "**Weighted Average Shares**: {}",
                format_number(field(statement, "weightedAverageShsOut"))
            ));
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StatementParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(client: Arc<FmpClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        common::markdown_route(Self::to_tool(), client, |client, params: StatementParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

/// Balance sheet tool.
#[derive(Debug, Clone)]
pub struct BalanceSheetTool;

impl BalanceSheetTool {
    pub const NAME: &'static str = "get_balance_sheet";

    pub const DESCRIPTION: &'static str =
        "Get a company's balance sheet: assets, liabilities, and shareholders' \
         equity for one or more periods.";

    pub async fn execute(client: &FmpClient, params: &StatementParams) -> String {
        info!(symbol = %params.symbol, period = %params.period, "fetching balance sheet");
        let data = client.get("balance-sheet-statement", &params.query()).await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let statements = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching balance sheet for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No balance sheet data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![format!("# Balance Sheet for {symbol}"), timestamp_line()];

        for statement in statements {
            lines.push(String::new());
            lines.push(period_heading(statement));
            lines.push(String::new());
            lines.push("### Assets".to_string());
            line_item(
                &mut lines,
                statement,
                "cashAndCashEquivalents",
                "Cash and Equivalents",
            );
            line_item(&mut lines, statement, "shortTermInvestments", "Short-Term Investments");
            line_item(&mut lines, statement, "netReceivables", "Receivables");
            line_item(&mut lines, statement, "inventory", "Inventory");
            line_item(&mut lines, statement, "totalCurrentAssets", "Total Current Assets");
            line_item(
                &mut lines,
                statement,
                "propertyPlantEquipmentNet",
                "Property, Plant & Equipment",
            );
            line_item(&mut lines, statement, "goodwill", "Goodwill");
            line_item(&mut lines, statement, "totalAssets", "Total Assets");
            lines.push(String::new());
            lines.push("### Liabilities".to_string());
            line_item(&mut lines, statement, "accountPayables", "Accounts Payable");
            line_item(&mut lines, statement, "shortTermDebt", "Short-Term Debt");
            line_item(
                &mut lines,
                statement,
                "totalCurrentLiabilities",
                "Total Current Liabilities",
            );
            line_item(&mut lines, statement, "longTermDebt", "Long-Term Debt");
            line_item(&mut lines, statement, "totalLiabilities", "Total Liabilities");
            lines.push(String::new());
            lines.push("### Shareholders' Equity".to_string());
            line_item(&mut lines, statement, "commonStock", "Common Stock");
            line_item(&mut lines, statement, "retainedEarnings", "Retained Earnings");
            line_item(
                &mut lines,
                statement,
                "totalStockholdersEquity",
                "Total Shareholders' Equity",
            );
            lines.push(String::new());
            lines.push("### Debt Position".to_string());
            line_item(&mut lines, statement, "totalDebt", "Total Debt");
            line_item(&mut lines, statement, "netDebt", "Net Debt");
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StatementParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(client: Arc<FmpClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        common::markdown_route(Self::to_tool(), client, |client, params: StatementParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

/// Cash flow statement tool.
#[derive(Debug, Clone)]
pub struct CashFlowTool;

impl CashFlowTool {
    pub const NAME: &'static str = "get_cash_flow";

    pub const DESCRIPTION: &'static str =
        "Get a company's cash flow statement: operating, investing, and \
         financing activities, plus free cash flow.";

    pub async fn execute(client: &FmpClient, params: &StatementParams) -> String {
        info!(symbol = %params.symbol, period = %params.period, "fetching cash flow statement");
        let data = client.get("cash-flow-statement", &params.query()).await;
        Self::render(&params.symbol, &data)
    }

    pub fn render(symbol: &str, data: &ApiResponse) -> String {
        let statements = match data {
            ApiResponse::Error(envelope) => {
                return format!(
                    "Error fetching cash flow statement for {symbol}: {}",
                    envelope.message
                );
            }
            _ => match data.records() {
                Some(records) if !records.is_empty() => records,
                _ => return format!("No cash flow data found for symbol {symbol}"),
            },
        };

        let mut lines = vec![
            format!("# Cash Flow Statement for {symbol}"),
            timestamp_line(),
        ];

        for statement in statements {
            lines.push(String::new());
            lines.push(period_heading(statement));
            lines.push(String::new());
            lines.push("### Operating Activities".to_string());
            line_item(&mut lines, statement, "netIncome", "Net Income");
            line_item(
                &mut lines,
                statement,
                "depreciationAndAmortization",
                "Depreciation & Amortization",
            );
            line_item(
                &mut lines,
                statement,
                "changeInWorkingCapital",
                "Change in Working Capital",
            );
            line_item(
                &mut lines,
                statement,
                "netCashProvidedByOperatingActivities",
                "Net Cash from Operations",
            );
            lines.push(String::new());
            lines.push("### Investing Activities".to_string());
            line_item(&mut lines, statement, "capitalExpenditure", "Capital Expenditure");
            line_item(&mut lines, statement, "acquisitionsNet", "Acquisitions");
            line_item(
                &mut lines,
                statement,
                "netCashProvidedByInvestingActivities",
                "Net Cash from Investing",
            );
            lines.push(String::new());
            lines.push("### Financing Activities".to_string());
            line_item(&mut lines, statement, "netDividendsPaid", "Dividends Paid");
            line_item(
                &mut lines,
                statement,
                "commonStockRepurchased",
                "Stock Repurchased",
            );
            line_item(
                &mut lines,
                statement,
                "netCashProvidedByFinancingActivities",
                "Net Cash from Financing",
            );
            lines.push(String::new());
            lines.push("### Summary".to_string());
            line_item(&mut lines, statement, "freeCashFlow", "Free Cash Flow");
            line_item(
                &mut lines,
                statement,
                "cashAtEndOfPeriod",
                "Cash at End of Period",
            );
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StatementParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(client: Arc<FmpClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        common::markdown_route(Self::to_tool(), client, |client, params: StatementParams| {
            Box::pin(async move { Self::execute(&client, &params).await })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_statement_params_defaults() {
        let params: StatementParams = serde_json::from_str(r#"{"symbol": "AAPL"}"#).unwrap();
        assert_eq!(params.period, "annual");
        assert_eq!(params.limit, 1);
    }

    #[test]
    fn test_income_statement_render() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "AAPL",
            "date": "2024-09-28",
            "period": "FY",
            "revenue": 391035000000_i64,
            "costOfRevenue": 210352000000_i64,
            "grossProfit": 180683000000_i64,
            "researchAndDevelopmentExpenses": 31370000000_i64,
            "sellingGeneralAndAdministrativeExpenses": 26097000000_i64,
            "operatingExpenses": 57467000000_i64,
            "operatingIncome": 123216000000_i64,
            "ebitda": 134661000000_i64,
            "incomeBeforeTax": 123485000000_i64,
            "incomeTaxExpense": 29749000000_i64,
            "netIncome": 93736000000_i64,
            "eps": 6.11,
            "epsDiluted": 6.08,
            "weightedAverageShsOut": 15343783000_i64
        }]));
        let report = IncomeStatementTool::render("AAPL", &data);
        assert!(report.contains("# Income Statement for AAPL"));
        assert!(report.contains("## Period: 2024-09-28 (FY)"));
        assert!(report.contains("### Revenue Metrics"));
        assert!(report.contains("**Revenue**: $391,035,000,000"));
        assert!(report.contains("**Gross Profit**: $180,683,000,000"));
        assert!(report.contains("### Tax and Net Income"));
        assert!(report.contains("**Net Income**: $93,736,000,000"));
        assert!(report.contains("### Per Share Data"));
        assert!(report.contains("**EPS**: $6.11"));
    }

    #[test]
    fn test_income_statement_error_and_empty() {
        let error = ApiResponse::error(ErrorKind::Timeout, "deadline exceeded");
        assert_eq!(
            IncomeStatementTool::render("AAPL", &error),
            "Error fetching income statement for AAPL: deadline exceeded"
        );
        let empty = ApiResponse::Payload(json!([]));
        assert_eq!(
            IncomeStatementTool::render("AAPL", &empty),
            "No income statement data found for symbol AAPL"
        );
    }

    #[test]
    fn test_balance_sheet_render() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "AAPL",
            "date": "2024-09-28",
            "period": "FY",
            "cashAndCashEquivalents": 29943000000_i64,
            "totalCurrentAssets": 152987000000_i64,
            "totalAssets": 364980000000_i64,
            "totalCurrentLiabilities": 176392000000_i64,
            "totalLiabilities": 308030000000_i64,
            "totalStockholdersEquity": 56950000000_i64,
            "netDebt": 76686000000_i64
        }]));
        let report = BalanceSheetTool::render("AAPL", &data);
        assert!(report.contains("# Balance Sheet for AAPL"));
        assert!(report.contains("### Assets"));
        assert!(report.contains("**Total Assets**: $364,980,000,000"));
        assert!(report.contains("### Liabilities"));
        assert!(report.contains("### Shareholders' Equity"));
        assert!(report.contains("**Net Debt**: $76,686,000,000"));
    }

    #[test]
    fn test_cash_flow_render() {
        let data = ApiResponse::Payload(json!([{
            "symbol": "AAPL",
            "date": "2024-09-28",
            "period": "FY",
            "netIncome": 93736000000_i64,
            "netCashProvidedByOperatingActivities": 118254000000_i64,
            "capitalExpenditure": -9447000000_i64,
            "freeCashFlow": 108807000000_i64
        }]));
        let report = CashFlowTool::render("AAPL", &data);
        assert!(report.contains("# Cash Flow Statement for AAPL"));
        assert!(report.contains("### Operating Activities"));
        assert!(report.contains("**Net Cash from Operations**: $118,254,000,000"));
        assert!(report.contains("**Capital Expenditure**: $-9,447,000,000"));
        assert!(report.contains("**Free Cash Flow**: $108,807,000,000"));
    }

    #[test]
    fn test_multiple_periods_render_multiple_sections() {
        let data = ApiResponse::Payload(json!([
            {"date": "2024-09-28", "period": "FY", "revenue": 1},
            {"date": "2023-09-30", "period": "FY", "revenue": 2}
        ]));
        let report = IncomeStatementTool::render("AAPL", &data);
        assert!(report.contains("## Period: 2024-09-28 (FY)"));
        assert!(report.contains("## Period: 2023-09-30 (FY)"));
    }
}
