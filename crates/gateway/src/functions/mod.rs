//! Proxy functions
//!
//! Each function validates its request, performs one primary write whose
//! failure fails the call, and then a handful of secondary writes that are
//! attempted once and only logged when they fail.

mod activate_agent;
mod create_deposit;
mod pool_stats;
mod stealth_address;

pub use activate_agent::{ActivateAgentCommand, ActivateAgentUseCase, AgentActivation};
pub use create_deposit::{AmountInput, CreateDepositCommand, CreateDepositUseCase, DepositReceipt};
pub use pool_stats::GetPoolStatsUseCase;
pub use stealth_address::{
    GenerateStealthAddressCommand, GenerateStealthAddressUseCase, PRIVACY_FEATURES,
    StealthAddressReceipt,
};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use uuid::Uuid;

use crate::data_api::{Filter, Row};

/// Main privacy pool row in `pool_statistics`
pub const MAIN_POOL: &str = "main";

/// Hyphenless random uuid
pub(crate) fn simple_uuid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// `Some` when the parameter is present and non-empty
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Filter selecting `row` by its `id` column
pub(crate) fn id_filter(row: &Row) -> Option<Filter> {
    match row.get("id")? {
        Value::String(id) => Some(Filter::eq("id", id)),
        Value::Null => None,
        other => Some(Filter::eq("id", other)),
    }
}

/// Numeric column that may arrive as a JSON number or numeric text
pub(crate) fn decimal_field(row: &Row, key: &str) -> Decimal {
    match row.get(key) {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()).unwrap_or_default(),
        Some(Value::String(s)) => parse_decimal(s).unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

pub(crate) fn count_field(row: &Row, key: &str) -> u64 {
    match row.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Decimal as a JSON number, the way the data API stores numerics
pub(crate) fn decimal_json(value: Decimal) -> Value {
    value
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_simple_uuid_has_no_hyphens() {
        let id = simple_uuid();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_present() {
        assert_eq!(present(&Some("0xabc".to_string())), Some("0xabc"));
        assert_eq!(present(&Some(String::new())), None);
        assert_eq!(present(&None), None);
    }

    #[test]
    fn test_numeric_fields() {
        let row = json!({
            "size": 52000000.5,
            "text_size": "1200.25",
            "mixers": 2345,
            "text_mixers": "12",
            "bogus": true,
        });

        assert_eq!(decimal_field(&row, "size"), dec!(52000000.5));
        assert_eq!(decimal_field(&row, "text_size"), dec!(1200.25));
        assert_eq!(decimal_field(&row, "missing"), Decimal::ZERO);
        assert_eq!(count_field(&row, "mixers"), 2345);
        assert_eq!(count_field(&row, "text_mixers"), 12);
        assert_eq!(count_field(&row, "bogus"), 0);
    }

    #[test]
    fn test_id_filter() {
        assert_eq!(id_filter(&json!({ "id": 4 })), Some(Filter::eq("id", 4)));
        assert_eq!(id_filter(&json!({ "id": "a-b" })), Some(Filter::eq("id", "a-b")));
        assert_eq!(id_filter(&json!({ "id": null })), None);
        assert_eq!(id_filter(&json!({})), None);
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(parse_decimal("1e-3"), Some(dec!(0.001)));
        assert_eq!(parse_decimal(" 2.5 "), Some(dec!(2.5)));
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn test_decimal_json() {
        assert_eq!(decimal_json(dec!(3000)), json!(3000.0));
        assert_eq!(decimal_json(dec!(1.5)), json!(1.5));
    }
}
