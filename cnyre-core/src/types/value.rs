use super::column::{Column, ColumnKind};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Borrowed view of one cell of a property record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Null,
    Text(&'a str),
    Int(i64),
    Float(f32),
}

impl<'a> Cell<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Stringified form used for substring search; None for null
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match *self {
            Cell::Null => None,
            Cell::Text(s) => Some(Cow::Borrowed(s)),
            Cell::Int(i) => Some(Cow::Owned(i.to_string())),
            Cell::Float(f) => Some(Cow::Owned(f.to_string())),
        }
    }

    /// Natural ordering of the column's values; null handling is left to the caller
    pub fn cmp_value(&self, other: &Cell<'_>) -> Ordering {
        match (self, other) {
            (Cell::Null, Cell::Null) => Ordering::Equal,
            (Cell::Null, _) => Ordering::Greater,
            (_, Cell::Null) => Ordering::Less,
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::Int(a), Cell::Int(b)) => a.cmp(b),
            (Cell::Float(a), Cell::Float(b)) => a.total_cmp(b),
            (Cell::Int(a), Cell::Float(b)) => (*a as f64).total_cmp(&(*b as f64)),
            (Cell::Float(a), Cell::Int(b)) => (*a as f64).total_cmp(&(*b as f64)),
            // Mixed kinds never occur within one column; keep the order total anyway
            (Cell::Text(_), _) => Ordering::Greater,
            (_, Cell::Text(_)) => Ordering::Less,
        }
    }

    /// Exact-match semantics used by the equality and membership filters
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Cell::Null, _) => false,
            (Cell::Text(a), Value::Text(b)) => *a == b.as_str(),
            (Cell::Int(a), Value::Int(b)) => a == b,
            (Cell::Int(a), Value::Float(b)) => (*a as f64) == *b,
            (Cell::Float(a), Value::Float(b)) => *a == *b as f32,
            (Cell::Float(a), Value::Int(b)) => *a == *b as f32,
            _ => false,
        }
    }

    pub fn to_value(&self) -> Option<Value> {
        match *self {
            Cell::Null => None,
            Cell::Text(s) => Some(Value::Text(s.to_string())),
            Cell::Int(i) => Some(Value::Int(i)),
            Cell::Float(f) => Some(Value::Float(f as f64)),
        }
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
        }
    }
}

/// An owned, non-null value supplied by the user for filtering
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Interpret user input according to the column's storage class
    pub fn parse_for(column: Column, raw: &str) -> Result<Value, String> {
        match column.kind() {
            ColumnKind::Text | ColumnKind::Category => Ok(Value::Text(raw.to_string())),
            ColumnKind::SmallInt => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("{} expects an integer, got '{}'", column, raw)),
            ColumnKind::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| format!("{} expects a number, got '{}'", column, raw)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}
