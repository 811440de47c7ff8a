//! Lenient numeric and date parsing for loosely typed payloads.
//!
//! Order and fibre records arrive from the order API with quantities that may
//! be JSON numbers, numeric strings, empty strings, `null`, or missing
//! entirely. Rather than failing, these values resolve to a typed [`Lenient`]
//! outcome that the engine collapses to zero with [`Lenient::or_zero`].
//!
//! Text parsing follows the leading-number rule used by the order UI: leading
//! whitespace is skipped and the longest numeric prefix is taken, so
//! `"12.5 kg"` parses as `12.5` while `"kg 12"` is invalid.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;

/// Outcome of leniently parsing a numeric field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lenient {
    /// A usable number.
    Parsed(Decimal),
    /// The field was absent, `null`, or an empty string.
    Missing,
    /// The field was present but not numeric. Holds the raw text for logging.
    Invalid(String),
}

impl Lenient {
    /// Parse an optional JSON value.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Number(n)) => {
                let text = n.to_string();
                parse_numeric_text(&text).map_or(Self::Invalid(text), Self::Parsed)
            }
            Some(Value::String(s)) => Self::from_text(s),
            Some(other) => Self::Invalid(other.to_string()),
        }
    }

    /// Parse a text field by its leading numeric prefix.
    #[must_use]
    pub fn from_text(s: &str) -> Self {
        let trimmed = s.trim_start();
        if trimmed.is_empty() {
            return Self::Missing;
        }

        numeric_prefix(trimmed)
            .and_then(|prefix| parse_numeric_text(&prefix))
            .map_or_else(|| Self::Invalid(s.to_owned()), Self::Parsed)
    }

    /// The parsed number, if there is one.
    #[must_use]
    pub const fn value(&self) -> Option<Decimal> {
        match self {
            Self::Parsed(d) => Some(*d),
            Self::Missing | Self::Invalid(_) => None,
        }
    }

    /// The parsed number, or zero for missing and invalid input.
    #[must_use]
    pub fn or_zero(&self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }

    /// Whether the field was present but unparseable.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Extract the longest leading numeric literal, normalised for `Decimal`.
///
/// Accepts an optional sign, digits with an optional fractional part, and an
/// optional exponent. At least one mantissa digit is required. Bare `"."` or
/// `"-"` yield `None`.
fn numeric_prefix(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    let mut out = String::new();

    if let Some(&sign @ (b'+' | b'-')) = bytes.first() {
        if sign == b'-' {
            out.push('-');
        }
        pos += 1;
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let int_digits = s.get(int_start..pos).unwrap_or("");

    let mut frac_digits = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        frac_digits = s.get(frac_start..end).unwrap_or("");
        if !int_digits.is_empty() || !frac_digits.is_empty() {
            pos = end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    out.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        let mut exponent = String::from("e");
        if let Some(&sign @ (b'+' | b'-')) = bytes.get(end) {
            if sign == b'-' {
                exponent.push('-');
            }
            end += 1;
        }
        let digits_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end > digits_start {
            exponent.push_str(s.get(digits_start..end).unwrap_or(""));
            out.push_str(&exponent);
        }
    }

    Some(out)
}

fn parse_numeric_text(text: &str) -> Option<Decimal> {
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    }
}

/// Leniently parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp (its date part is used).
/// Anything else, including `null` and non-string values, yields `None`.
#[must_use]
pub fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    let text = value?.as_str()?.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }

    // Naive timestamps such as "2024-05-01T00:00:00" without an offset.
    text.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_numbers_parse() {
        assert_eq!(
            Lenient::from_value(Some(&json!(80))),
            Lenient::Parsed(dec!(80))
        );
        assert_eq!(
            Lenient::from_value(Some(&json!(62.5))),
            Lenient::Parsed(dec!(62.5))
        );
        assert_eq!(
            Lenient::from_value(Some(&json!(-3))),
            Lenient::Parsed(dec!(-3))
        );
    }

    #[test]
    fn test_numeric_strings_parse() {
        assert_eq!(
            Lenient::from_value(Some(&json!("1000.50"))),
            Lenient::Parsed(dec!(1000.50))
        );
        assert_eq!(Lenient::from_text("  40"), Lenient::Parsed(dec!(40)));
        assert_eq!(Lenient::from_text(".5"), Lenient::Parsed(dec!(0.5)));
        assert_eq!(Lenient::from_text("5."), Lenient::Parsed(dec!(5)));
    }

    #[test]
    fn test_leading_prefix_wins() {
        assert_eq!(Lenient::from_text("12.5 kg"), Lenient::Parsed(dec!(12.5)));
        assert_eq!(Lenient::from_text("60%"), Lenient::Parsed(dec!(60)));
        assert_eq!(Lenient::from_text("1.2.3"), Lenient::Parsed(dec!(1.2)));
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(Lenient::from_text("1.5e3"), Lenient::Parsed(dec!(1500)));
        assert_eq!(Lenient::from_text("25e-1"), Lenient::Parsed(dec!(2.5)));
        // A dangling exponent marker is ignored.
        assert_eq!(Lenient::from_text("7e"), Lenient::Parsed(dec!(7)));
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(Lenient::from_value(None), Lenient::Missing);
        assert_eq!(Lenient::from_value(Some(&Value::Null)), Lenient::Missing);
        assert_eq!(Lenient::from_value(Some(&json!(""))), Lenient::Missing);
        assert_eq!(Lenient::from_text("   "), Lenient::Missing);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Lenient::from_text("abc").is_invalid());
        assert!(Lenient::from_text("-").is_invalid());
        assert!(Lenient::from_text(".").is_invalid());
        assert!(Lenient::from_text("NaN").is_invalid());
        assert!(Lenient::from_value(Some(&json!(true))).is_invalid());
        assert!(Lenient::from_value(Some(&json!({"kg": 1}))).is_invalid());
    }

    #[test]
    fn test_or_zero() {
        assert_eq!(Lenient::Missing.or_zero(), Decimal::ZERO);
        assert_eq!(Lenient::Invalid("x".into()).or_zero(), Decimal::ZERO);
        assert_eq!(Lenient::Parsed(dec!(4.2)).or_zero(), dec!(4.2));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_date(Some(&json!("2024-05-01"))), Some(expected));
        assert_eq!(
            parse_date(Some(&json!("2024-05-01T10:30:00Z"))),
            Some(expected)
        );
        assert_eq!(
            parse_date(Some(&json!("2024-05-01T10:30:00"))),
            Some(expected)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(None), None);
        assert_eq!(parse_date(Some(&Value::Null)), None);
        assert_eq!(parse_date(Some(&json!("soon"))), None);
        assert_eq!(parse_date(Some(&json!(20_240_501))), None);
    }
}
