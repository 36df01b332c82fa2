//! Catalog query executor.
//!
//! Resolves a query id against a table snapshot and runs the definition's
//! pure function. The executor holds only a shared reference to the
//! immutable table, so executions are side-effect free and safe to repeat
//! or run concurrently against the same snapshot.

use salescope_core::TransactionTable;

use crate::catalog::{self, QueryDef};
use crate::error::QueryError;
use crate::value::QueryResult;

/// Query executor bound to one table snapshot.
pub struct Executor<'a> {
    table: &'a TransactionTable,
}

impl<'a> Executor<'a> {
    /// Create an executor for the given table.
    #[must_use]
    pub const fn new(table: &'a TransactionTable) -> Self {
        Self { table }
    }

    /// Execute the catalog query with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownQuery`] if the id is not in the catalog.
    pub fn execute(&self, id: u16) -> Result<QueryResult, QueryError> {
        let def = catalog::find(id).ok_or(QueryError::UnknownQuery(id))?;
        Ok(def.execute(self.table))
    }
}

/// Ordered `(id, label)` view of the catalog, for external selectors.
pub fn list_queries() -> impl Iterator<Item = (u16, &'static str)> {
    catalog::catalog().iter().map(|def| (def.id, def.label))
}

/// All catalog definitions, in id order.
#[must_use]
pub fn definitions() -> &'static [QueryDef] {
    catalog::catalog()
}
