//! Common utilities shared across market-data tools.
//!
//! This module provides the shared display formatting (counts with commas,
//! currency, percent, dates, change markers) and the route plumbing every
//! tool uses. Absence is typed: helpers take `Option` and render the
//! literal `N/A` only at this display boundary.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Content, Tool},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::api::FmpClient;

/// Format a JSON number with thousands separators.
///
/// Integers keep no decimals (`2,840,000,000,000`); floats keep two
/// (`150.00`), mirroring how the upstream reports prices vs. counts.
/// Anything absent or non-numeric renders as `N/A`.
pub fn format_number(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return "N/A".to_string();
    };
    if let Some(i) = value.as_i64() {
        return group_signed(i);
    }
    if let Some(u) = value.as_u64() {
        return group_digits(&u.to_string());
    }
    if let Some(f) = value.as_f64() {
        return group_float(f);
    }
    match value {
        Value::String(s) if !s.is_empty() => s.clone(),
        _ => "N/A".to_string(),
    }
}

/// Format a JSON number as a dollar amount (`$1,234.56`).
pub fn format_currency(value: Option<&Value>) -> String {
    match value {
        Some(v) if v.is_number() => format!("${}", format_number(Some(v))),
        _ => "N/A".to_string(),
    }
}

/// Format a ratio as a percentage with two decimals (`1.00%`).
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "N/A".to_string(),
    }
}

/// Direction marker for a signed change: 🔺 up, 🔻 down, ➖ flat.
pub fn change_emoji(change: f64) -> &'static str {
    if change > 0.0 {
        "🔺"
    } else if change < 0.0 {
        "🔻"
    } else {
        "➖"
    }
}

/// Numeric field accessor.
pub fn num(record: &Value, key: &str) -> Option<f64> {
    record.get(key).and_then(Value::as_f64)
}

/// Raw field accessor, for [`format_number`]/[`format_currency`].
pub fn field<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    match record.get(key) {
        Some(Value::Null) => None,
        other => other,
    }
}

/// String field accessor.
pub fn text<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// String field accessor with a fallback.
pub fn text_or<'a>(record: &'a Value, key: &str, default: &'a str) -> &'a str {
    text(record, key).unwrap_or(default)
}

/// The `*Data as of ...*` footer line stamped on time-sensitive reports.
pub fn timestamp_line() -> String {
    format!("*Data as of {}*", Local::now().format("%Y-%m-%d %H:%M:%S"))
}

/// Render an ISO date (`2023-05-29`) as `May 29, 2023`.
///
/// Unparseable input is passed through untouched.
pub fn format_date_long(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%B %d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Default limit for list-shaped tools.
pub fn default_limit() -> usize {
    10
}

/// Validate and clamp limit to allowed range (1-100).
pub fn validate_limit(limit: usize) -> usize {
    limit.clamp(1, 100)
}

/// Build a ToolRoute for a markdown-producing tool.
///
/// Parses the call arguments into the tool's typed params, runs the tool
/// against the shared gateway client, and wraps the markdown report as a
/// text result. Upstream failures are already rendered as readable text by
/// the tool itself; only malformed arguments become a protocol error.
pub fn markdown_route<S, P, F>(tool: Tool, client: Arc<FmpClient>, run: F) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
    F: Fn(Arc<FmpClient>, P) -> BoxFuture<'static, String> + Send + Sync + Clone + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let client = client.clone();
        let run = run.clone();
        let args = ctx.arguments.clone().unwrap_or_default();
        async move {
            let params: P = serde_json::from_value(Value::Object(args))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
            let report = run(client, params).await;
            Ok(CallToolResult::success(vec![Content::text(report)]))
        }
        .boxed()
    })
}

/// Build a ToolRoute for a markdown-producing tool that takes no parameters.
pub fn list_route<S, F>(tool: Tool, client: Arc<FmpClient>, run: F) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    F: Fn(Arc<FmpClient>) -> BoxFuture<'static, String> + Send + Sync + Clone + 'static,
{
    ToolRoute::new_dyn(tool, move |_ctx: ToolCallContext<'_, S>| {
        let client = client.clone();
        let run = run.clone();
        async move {
            let report = run(client).await;
            Ok(CallToolResult::success(vec![Content::text(report)]))
        }
        .boxed()
    })
}

fn group_signed(i: i64) -> String {
    let grouped = group_digits(&i.unsigned_abs().to_string());
    if i < 0 { format!("-{grouped}") } else { grouped }
}

fn group_float(f: f64) -> String {
    let formatted = format!("{:.2}", f.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if f < 0.0 { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_digits(int_part))
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_number_integer_with_commas() {
        let value = json!(2_840_000_000_000_i64);
        assert_eq!(format_number(Some(&value)), "2,840,000,000,000");
    }

    #[test]
    fn test_format_number_float_two_decimals() {
        let value = json!(150.0);
        assert_eq!(format_number(Some(&value)), "150.00");
        let value = json!(1234567.891);
        assert_eq!(format_number(Some(&value)), "1,234,567.89");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(Some(&json!(-1234))), "-1,234");
        assert_eq!(format_number(Some(&json!(-1.5))), "-1.50");
    }

    #[test]
    fn test_format_number_absent_is_na() {
        assert_eq!(format_number(None), "N/A");
        assert_eq!(format_number(Some(&Value::Null)), "N/A");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Some(&json!(150.0))), "$150.00");
        assert_eq!(format_currency(None), "N/A");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(1.0)), "1.00%");
        assert_eq!(format_percent(Some(-2.345)), "-2.35%");
        assert_eq!(format_percent(None), "N/A");
    }

    #[test]
    fn test_change_emoji() {
        assert_eq!(change_emoji(1.5), "🔺");
        assert_eq!(change_emoji(-0.1), "🔻");
        assert_eq!(change_emoji(0.0), "➖");
    }

    #[test]
    fn test_format_date_long() {
        assert_eq!(format_date_long("2023-05-29"), "May 29, 2023");
        assert_eq!(format_date_long("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_field_treats_null_as_absent() {
        let record = json!({"eps": null, "pe": 24.5});
        assert!(field(&record, "eps").is_none());
        assert!(field(&record, "pe").is_some());
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(10), 10);
        assert_eq!(validate_limit(0), 1);
        assert_eq!(validate_limit(200), 100);
    }

    #[test]
    fn test_timestamp_line_shape() {
        let line = timestamp_line();
        assert!(line.starts_with("*Data as of "));
        assert!(line.ends_with('*'));
    }
}
