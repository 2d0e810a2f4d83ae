//! Lenient access to raw source records.
//!
//! Feeds have shipped with different header spellings (export headers with
//! accents and trailing spaces, snake_case, English), localized decimals
//! and either whole-unit or cent-scaled money. Everything here is lossy but
//! never fails: unparseable numbers become `0`, unparseable dates become
//! `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unit the source uses for money amounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneyScale {
    /// Amounts are whole currency units (`99.90`)
    #[default]
    Units,
    /// Amounts are cents (`9990`)
    Cents,
}

impl MoneyScale {
    /// Convert a source amount to whole currency units
    pub fn to_units(self, amount: f64) -> f64 {
        match self {
            MoneyScale::Units => amount,
            MoneyScale::Cents => amount / 100.0,
        }
    }
}

/// Caller-supplied ingestion settings, resolved once per data source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    #[serde(default)]
    pub money_scale: MoneyScale,
}

/// Read-only view over one raw JSON object
pub struct RawRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// First field matching one of `aliases`.
    ///
    /// Keys are compared trimmed and case-insensitively; alias order wins
    /// over key order.
    pub fn get(&self, aliases: &[&str]) -> Option<&'a Value> {
        aliases.iter().find_map(|alias| {
            let alias = normalize_key(alias);
            self.fields
                .iter()
                .find(|(key, _)| normalize_key(key) == alias)
                .map(|(_, value)| value)
        })
    }

    /// Optional text field. Missing or `null` is `None`; an explicit empty
    /// string stays `Some("")`.
    pub fn text(&self, aliases: &[&str]) -> Option<String> {
        match self.get(aliases)? {
            Value::Null => None,
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(scalar_to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Value::Object(_) => {
                tracing::debug!("field {} holds an object, ignored", field_name(aliases));
                None
            }
        }
    }

    /// Text field that must exist in the canonical schema; absent becomes `""`
    pub fn required_text(&self, aliases: &[&str]) -> String {
        self.text(aliases).unwrap_or_default()
    }

    /// Required numeric field; anything unparseable is `0`
    pub fn number(&self, aliases: &[&str]) -> f64 {
        match self.get(aliases).and_then(value_to_f64) {
            Some(n) => n,
            None => {
                tracing::debug!("field {} is not numeric, defaulting to 0", field_name(aliases));
                0.0
            }
        }
    }

    /// Optional numeric field. Missing, `null` or blank is `None`; any other
    /// unparseable value is `Some(0)`.
    pub fn optional_number(&self, aliases: &[&str]) -> Option<f64> {
        match self.get(aliases)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            value => Some(value_to_f64(value).unwrap_or_else(|| {
                tracing::debug!("field {} is not numeric, defaulting to 0", field_name(aliases));
                0.0
            })),
        }
    }

    /// Money amount in whole units, clamped to be non-negative
    pub fn money(&self, aliases: &[&str], scale: MoneyScale) -> f64 {
        scale.to_units(self.number(aliases)).max(0.0)
    }

    /// Optional money amount in whole units, clamped to be non-negative
    pub fn optional_money(&self, aliases: &[&str], scale: MoneyScale) -> Option<f64> {
        self.optional_number(aliases)
            .map(|amount| scale.to_units(amount).max(0.0))
    }

    /// Non-negative integer count; fractions are truncated
    pub fn count(&self, aliases: &[&str]) -> u32 {
        let n = self.number(aliases);
        if n <= 0.0 {
            0
        } else {
            n.trunc().min(u32::MAX as f64) as u32
        }
    }

    /// Date-time field, `None` when missing or in an unknown format
    pub fn date_time(&self, aliases: &[&str]) -> Option<NaiveDateTime> {
        let raw = self.text(aliases)?;
        let parsed = parse_date_time(&raw);
        if parsed.is_none() && !raw.is_empty() {
            tracing::warn!("unrecognized date '{}' in field {}", raw, field_name(aliases));
        }
        parsed
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

fn field_name<'s>(aliases: &[&'s str]) -> &'s str {
    aliases.first().copied().unwrap_or("?")
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Currency markers accepted in front of an amount
const CURRENCY_PREFIXES: &[&str] = &["R$", "US$", "$", "€"];

/// Parse a decimal that may use comma or dot as the decimal separator and
/// may carry thousands separators or a currency prefix.
///
/// Plain Rust float syntax (including exponents) is tried first. Otherwise
/// only an optional sign and currency prefix may precede a body made of
/// digits, commas and dots; anything else is not a number. When both
/// separators appear, the last one is the decimal separator. A single comma
/// is a decimal comma (`"99,90"`); repeated commas or dots are thousands
/// separators.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value).filter(|v| v.is_finite());
    }

    let (mut negative, mut body) = split_sign(trimmed);
    if let Some(rest) = CURRENCY_PREFIXES
        .iter()
        .find_map(|prefix| body.strip_prefix(prefix))
    {
        body = rest.trim_start();
        if !negative {
            (negative, body) = split_sign(body);
        }
    }

    let well_formed = body.chars().any(|c| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.');
    if !well_formed {
        return None;
    }

    let last_comma = body.rfind(',');
    let last_dot = body.rfind('.');
    let normalized = match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if comma > dot => body.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => body.replace(',', ""),
        (Some(_), None) if body.matches(',').count() == 1 => body.replace(',', "."),
        (Some(_), None) => body.replace(',', ""),
        (None, Some(_)) if body.matches('.').count() > 1 => body.replace('.', ""),
        _ => body.to_string(),
    };

    let value = normalized.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -value } else { value })
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, s),
    }
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y"];

/// Parse the date formats seen in source feeds.
///
/// Offsets are dropped: the wall-clock time of the store is kept, so an
/// order placed late in the evening stays on its local calendar day.
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_parse_decimal_formats() {
        assert_eq!(parse_decimal("1234.56"), Some(1234.56));
        assert_eq!(parse_decimal("1.234,56"), Some(1234.56));
        assert_eq!(parse_decimal("1,234.56"), Some(1234.56));
        assert_eq!(parse_decimal("99,90"), Some(99.9));
        assert_eq!(parse_decimal("R$ 10,00"), Some(10.0));
        assert_eq!(parse_decimal("1.234.567"), Some(1234567.0));
        assert_eq!(parse_decimal("-15,5"), Some(-15.5));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn test_parse_decimal_exponent_and_signed_currency() {
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal("1.5e2"), Some(150.0));
        assert_eq!(parse_decimal("R$ -10,00"), Some(-10.0));
        assert_eq!(parse_decimal("-R$ 1.234,50"), Some(-1234.5));
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_parse_decimal_rejects_text_around_digits() {
        assert_eq!(parse_decimal("abc12"), None);
        assert_eq!(parse_decimal("2 a 3"), None);
        assert_eq!(parse_decimal("2024-01-10"), None);
        assert_eq!(parse_decimal("ver obs. 3"), None);
        assert_eq!(parse_decimal("12abc"), None);

        let map = fields(json!({ "total": "ver obs. 3", "date": "2024-01-10" }));
        let record = RawRecord::new(&map);
        assert_eq!(record.money(&["total"], MoneyScale::Units), 0.0);
        assert_eq!(record.number(&["date"]), 0.0);
    }

    #[test]
    fn test_alias_lookup_ignores_case_and_padding() {
        let map = fields(json!({ "Valor Total ": "150,00", "STATUS": "Pago" }));
        let record = RawRecord::new(&map);
        assert_eq!(record.number(&["valor total"]), 150.0);
        assert_eq!(record.text(&["status"]).as_deref(), Some("Pago"));
    }

    #[test]
    fn test_alias_order_wins() {
        let map = fields(json!({ "b": "second", "a": "first" }));
        let record = RawRecord::new(&map);
        assert_eq!(record.text(&["a", "b"]).as_deref(), Some("first"));
    }

    #[test]
    fn test_absent_and_empty_text_are_distinct() {
        let map = fields(json!({ "coupon": "", "term": null }));
        let record = RawRecord::new(&map);
        assert_eq!(record.text(&["coupon"]), Some(String::new()));
        assert_eq!(record.text(&["term"]), None);
        assert_eq!(record.text(&["missing"]), None);
    }

    #[test]
    fn test_number_defaults_to_zero() {
        let map = fields(json!({ "price": "n/a", "qty": "" }));
        let record = RawRecord::new(&map);
        assert_eq!(record.number(&["price"]), 0.0);
        assert_eq!(record.number(&["qty"]), 0.0);
        assert_eq!(record.number(&["missing"]), 0.0);
    }

    #[test]
    fn test_optional_number() {
        let map = fields(json!({ "cost": "0", "blank": " ", "bad": "x", "none": null }));
        let record = RawRecord::new(&map);
        assert_eq!(record.optional_number(&["cost"]), Some(0.0));
        assert_eq!(record.optional_number(&["blank"]), None);
        assert_eq!(record.optional_number(&["bad"]), Some(0.0));
        assert_eq!(record.optional_number(&["none"]), None);
        assert_eq!(record.optional_number(&["missing"]), None);
    }

    #[test]
    fn test_money_scale_and_clamp() {
        let map = fields(json!({ "cents": 12345, "negative": "-10" }));
        let record = RawRecord::new(&map);
        assert_eq!(record.money(&["cents"], MoneyScale::Cents), 123.45);
        assert_eq!(record.money(&["cents"], MoneyScale::Units), 12345.0);
        assert_eq!(record.money(&["negative"], MoneyScale::Units), 0.0);
    }

    #[test]
    fn test_count() {
        let map = fields(json!({ "a": "3", "b": 2.7, "c": -1 }));
        let record = RawRecord::new(&map);
        assert_eq!(record.count(&["a"]), 3);
        assert_eq!(record.count(&["b"]), 2);
        assert_eq!(record.count(&["c"]), 0);
    }

    #[test]
    fn test_array_text_is_joined() {
        let map = fields(json!({ "products": ["Shoe", "Hat"] }));
        let record = RawRecord::new(&map);
        assert_eq!(record.text(&["products"]).as_deref(), Some("Shoe, Hat"));
    }

    #[test]
    fn test_parse_date_time_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 2, 26)
            .unwrap();
        assert_eq!(parse_date_time("2024-03-15T14:02:26Z"), Some(expected));
        assert_eq!(parse_date_time("2024-03-15T14:02:26-03:00"), Some(expected));
        assert_eq!(parse_date_time("2024-03-15 14:02:26"), Some(expected));
        assert_eq!(parse_date_time("15/03/2024 14:02:26"), Some(expected));

        let midnight = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date_time("2024-03-15"), Some(midnight));
        assert_eq!(parse_date_time("15/03/2024"), Some(midnight));
        assert_eq!(parse_date_time("15.03.2024"), Some(midnight));
        assert_eq!(parse_date_time("yesterday"), None);
    }
}
