use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field of a telemetry row after type coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Coerce raw CSV text into a value.
    ///
    /// Returns `None` for empty fields so they are treated as absent.
    pub fn from_field(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        match parse_numeric(raw) {
            Some(n) => Some(FieldValue::Number(n)),
            None => Some(FieldValue::Text(raw.to_string())),
        }
    }

    /// Get as f64 if this is a numeric value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, FieldValue::Number(_))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{}", v),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parse text that is entirely numeric: optional sign, digits with an
/// optional decimal part, optional exponent. Surrounding whitespace is allowed.
///
/// `f64::from_str` alone would also accept "NaN", "inf" and "infinity",
/// which must stay text.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }

    if i != bytes.len() {
        return None;
    }

    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("42"), Some(42.0));
        assert_eq!(parse_numeric("-3.5"), Some(-3.5));
        assert_eq!(parse_numeric("+7"), Some(7.0));
        assert_eq!(parse_numeric(".25"), Some(0.25));
        assert_eq!(parse_numeric("5."), Some(5.0));
        assert_eq!(parse_numeric(" 12 "), Some(12.0));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("2.5E-1"), Some(0.25));
    }

    #[test]
    fn test_non_numeric_stays_text() {
        for raw in ["NaN", "inf", "-infinity", "abc", "1.2.3", "-", ".", "1e", "0x10", "12km"] {
            assert_eq!(parse_numeric(raw), None, "{raw} should not be numeric");
        }
        assert_eq!(FieldValue::from_field("pit"), Some(FieldValue::Text("pit".into())));
    }

    #[test]
    fn test_empty_field_is_absent() {
        assert_eq!(FieldValue::from_field(""), None);
        assert_eq!(FieldValue::from_field("0"), Some(FieldValue::Number(0.0)));
    }
}
