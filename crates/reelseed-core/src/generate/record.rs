//! # Seed Records
//!
//! Every seeded table has an explicit row struct. The `record!` macro
//! declares the struct and its `Record` impl from a single field list, so the
//! column names, their order, and the values rendered for them can never
//! drift apart.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};

use crate::generate::value::Value;

/// A row of one seeded table.
pub trait Record {
    /// Target table name.
    const TABLE: &'static str;
    /// Column names in declaration order.
    const COLUMNS: &'static [&'static str];

    /// Column values, in the same order as `COLUMNS`.
    fn values(&self) -> Vec<Value>;
}

/// Conversion of a record field into a column value.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(Cow::Owned(self.clone()))
    }
}

impl ToValue for Cow<'static, str> {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

/// Declare a row struct bound to a table.
///
/// ```ignore
/// record! {
///     pub struct TagRow => "tags" {
///         id: i64,
///         name: String,
///     }
/// }
/// ```
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $table:literal {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $( $(#[$field_meta])* pub $field: $ty, )+
        }

        impl $crate::generate::record::Record for $name {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [&'static str] = &[$(stringify!($field)),+];

            fn values(&self) -> Vec<$crate::generate::value::Value> {
                use $crate::generate::record::ToValue;
                vec![$(self.$field.to_value()),+]
            }
        }
    };
}

pub(crate) use record;

#[cfg(test)]
mod tests {
    use super::*;

    record! {
        struct ProbeRow => "probes" {
            id: i64,
            label: String,
            parent_id: Option<i64>,
            active: bool,
        }
    }

    #[test]
    fn test_columns_follow_declaration_order() {
        assert_eq!(ProbeRow::TABLE, "probes");
        assert_eq!(ProbeRow::COLUMNS, &["id", "label", "parent_id", "active"]);
    }

    #[test]
    fn test_values_align_with_columns() {
        let row = ProbeRow {
            id: 7,
            label: "seven".to_string(),
            parent_id: None,
            active: true,
        };
        let values = row.values();
        assert_eq!(values.len(), ProbeRow::COLUMNS.len());
        assert_eq!(values[0], Value::Int(7));
        assert_eq!(values[1].as_string(), Some("seven"));
        assert!(values[2].is_null());
        assert_eq!(values[3], Value::Bool(true));
    }
}
