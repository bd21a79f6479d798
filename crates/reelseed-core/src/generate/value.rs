use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};

/// A generated value for a single column of a seed row.
///
/// The `String` variant uses `Cow<'static, str>` so that values drawn from
/// static lookup tables (release types, built-in vocabularies) can be held as
/// `&'static str` borrows, while synthesized text (names, emails, reviews) is
/// stored as an owned `String`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
}

impl Value {
    /// Convert to a SQL literal suitable for a MySQL `INSERT` statement.
    ///
    /// Returns `None` for values that have no literal form (non-finite
    /// floats). Callers turn that into `SeedError::UnsupportedValueKind`
    /// with the table and column attached; such values are never coerced.
    pub fn to_sql_literal(&self) -> Option<String> {
        let literal = match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => {
                if *b {
                    "1".to_string()
                } else {
                    "0".to_string()
                }
            }
            Value::Int(i) => i.to_string(),
            Value::Float(f) => {
                if !f.is_finite() {
                    return None;
                }
                format!("{}", f)
            }
            Value::String(s) => quote(s),
            Value::Timestamp(ts) => format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S")),
            Value::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        };
        Some(literal)
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(f) if f.is_nan() => "NaN float",
            Value::Float(f) if f.is_infinite() => "infinite float",
            Value::Float(_) => "float",
            Value::String(_) => "text",
            Value::Timestamp(_) => "timestamp",
            Value::Date(_) => "date",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Single-quote a text literal, doubling embedded quotes and backslashes.
///
/// Backslashes matter for MySQL, which treats `\` as an escape character
/// inside string literals unless `NO_BACKSLASH_ESCAPES` is set.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_literal() {
        assert_eq!(Value::Null.to_sql_literal().as_deref(), Some("NULL"));
    }

    #[test]
    fn test_numbers_are_bare() {
        assert_eq!(Value::Int(42).to_sql_literal().as_deref(), Some("42"));
        assert_eq!(Value::Int(-7).to_sql_literal().as_deref(), Some("-7"));
        assert_eq!(Value::Float(2.5).to_sql_literal().as_deref(), Some("2.5"));
    }

    #[test]
    fn test_bools_render_as_mysql_flags() {
        assert_eq!(Value::Bool(true).to_sql_literal().as_deref(), Some("1"));
        assert_eq!(Value::Bool(false).to_sql_literal().as_deref(), Some("0"));
    }

    #[test]
    fn test_quote_and_backslash_are_doubled() {
        let v = Value::String(Cow::Borrowed(r"O'Brien\dir"));
        assert_eq!(
            v.to_sql_literal().as_deref(),
            Some(r"'O''Brien\\dir'")
        );
    }

    #[test]
    fn test_plain_text_is_quoted() {
        let v = Value::String(Cow::Owned("Hidden Gems".to_string()));
        assert_eq!(v.to_sql_literal().as_deref(), Some("'Hidden Gems'"));
    }

    #[test]
    fn test_temporal_literals() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let ts = d.and_hms_opt(8, 5, 3).unwrap();
        assert_eq!(
            Value::Timestamp(ts).to_sql_literal().as_deref(),
            Some("'2024-02-29 08:05:03'")
        );
        assert_eq!(
            Value::Date(d).to_sql_literal().as_deref(),
            Some("'2024-02-29'")
        );
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        assert!(Value::Float(f64::NAN).to_sql_literal().is_none());
        assert!(Value::Float(f64::INFINITY).to_sql_literal().is_none());
        assert_eq!(Value::Float(f64::NEG_INFINITY).kind(), "infinite float");
    }
}
