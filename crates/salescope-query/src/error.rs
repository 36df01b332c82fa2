//! Query error types.

use thiserror::Error;

/// Error returned when executing a catalog query fails.
///
/// The catalog is closed and every definition is a total function of the
/// table, so the only runtime failure is asking for an id that does not
/// exist. Empty or all-null aggregates are not errors; they surface as
/// [`Value::Null`](crate::Value::Null) in the result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The requested id is not in the catalog. Caller error, never retried.
    #[error("unknown query id: {0}")]
    UnknownQuery(u16),
}
