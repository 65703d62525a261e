//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// A dynamic value read from a record field.
///
/// Records handed to the presenter come from loosely typed sources (REST
/// payloads, log entries, job rows), so every field is carried as a `Value`.
///
/// # Type Mapping
///
/// | JSON            | Rust Variant |
/// |-----------------|--------------|
/// | null            | `Null` |
/// | true / false    | `Bool` |
/// | integer         | `Int` |
/// | other number    | `Float` |
/// | string          | `String` |
/// | array / object  | `String` (compact JSON text) |
///
/// `DateTime` is never produced from JSON directly; it exists for records
/// built in code.
///
/// # Example
///
/// ```
/// use datatable_lib::model::Value;
///
/// let name = Value::from("worker-7");
/// let retries = Value::from(3i64);
/// assert_eq!(retries.to_string(), "3");
/// assert!(Value::Null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Returns the numeric value for `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the calendar date this value denotes, if any.
    ///
    /// Strings are accepted as RFC 3339 timestamps or `YYYY-MM-DD` dates.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::DateTime(dt) => Some(dt.date_naive()),
            Value::String(s) => parse_date(s),
            _ => None,
        }
    }

    /// Native ordering used by column sorting.
    ///
    /// Numeric when both sides are numbers, chronological when both are
    /// timestamps, lexical on the string coercion otherwise.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.to_string().cmp(&other.to_string()),
            },
        }
    }
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Value::String(other.to_string())
            }
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        v.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_coercion() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_compare_numeric_before_lexical() {
        // Lexically "10" < "9", numerically it is not.
        assert_eq!(Value::Int(10).compare(&Value::Int(9)), Ordering::Greater);
        assert_eq!(Value::Int(2).compare(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(
            Value::from("10").compare(&Value::from("9")),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_mixed_falls_back_to_strings() {
        assert_eq!(
            Value::Int(5).compare(&Value::from("abc")),
            Ordering::Less
        );
        assert_eq!(Value::Null.compare(&Value::from("a")), Ordering::Less);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from(serde_json::json!(3)), Value::Int(3));
        assert_eq!(Value::from(serde_json::json!(0.25)), Value::Float(0.25));
        assert_eq!(
            Value::from(serde_json::json!(["a", 1])),
            Value::String("[\"a\",1]".to_string())
        );
    }

    #[test]
    fn test_as_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(Value::from("2024-03-09").as_date(), expected);
        assert_eq!(Value::from("2024-03-09T22:15:00Z").as_date(), expected);
        assert_eq!(Value::from("yesterday").as_date(), None);
        assert_eq!(Value::Int(3).as_date(), None);
    }
}
