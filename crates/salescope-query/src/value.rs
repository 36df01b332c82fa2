//! Result values for catalog queries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value in a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// String value.
    String(String),
    /// Numeric value (amounts, means, percentages).
    Number(Decimal),
    /// Integer value (counts).
    Integer(i64),
    /// Undefined value: the aggregate had no qualifying rows.
    Null,
}

impl Value {
    /// Whether this value is the undefined marker.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Null => write!(f, "n/a"),
        }
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Integer(n as i64)
    }
}

impl From<Option<Decimal>> for Value {
    fn from(n: Option<Decimal>) -> Self {
        n.map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// The result of one catalog query execution.
///
/// Constructed once per execution, immutable, discarded after display. The
/// pair order of a `Series` is whatever the definition produced; callers may
/// re-sort for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryResult {
    /// A single value, not broken down by group.
    Scalar {
        /// Display label of the query.
        label: String,
        /// The computed value; `Null` when undefined.
        value: Value,
    },
    /// An ordered sequence of (group key, value) pairs.
    Series {
        /// Display label of the query.
        label: String,
        /// Grouped values in the order the definition produced them.
        pairs: Vec<(String, Value)>,
    },
    /// A multi-column listing.
    Table {
        /// Display label of the query.
        label: String,
        /// Column headers.
        columns: Vec<String>,
        /// Rows, each with one value per column.
        rows: Vec<Vec<Value>>,
    },
}

impl QueryResult {
    /// The display label of the query that produced this result.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Scalar { label, .. } | Self::Series { label, .. } | Self::Table { label, .. } => {
                label
            }
        }
    }

    /// Number of entries: 1 for a scalar, pair count for a series, row
    /// count for a table.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar { .. } => 1,
            Self::Series { pairs, .. } => pairs.len(),
            Self::Table { rows, .. } => rows.len(),
        }
    }

    /// Whether the result carries no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar { .. } => false,
            Self::Series { pairs, .. } => pairs.is_empty(),
            Self::Table { rows, .. } => rows.is_empty(),
        }
    }
}
