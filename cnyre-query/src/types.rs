use crate::QueryError;
use cnyre_core::{Column, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, SortDirection::Descending)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            _ => Err(QueryError::InvalidDirection(s.to_string())),
        }
    }
}

/// Single-value selection where `All` means no filtering
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(Value),
}

impl Selection {
    /// Selection for `column` from optional user input; absent input selects everything
    pub fn parse(column: Column, raw: Option<&str>) -> Result<Self, QueryError> {
        raw.map(|r| Value::parse_for(column, r))
            .transpose()
            .map(Selection::from)
            .map_err(QueryError::InvalidValue)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl From<Option<Value>> for Selection {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Selection::All, Selection::Only)
    }
}
