//! The transaction table snapshot.

use crate::record::{RawRow, TransactionRecord};

/// An immutable, ordered snapshot of transaction records.
///
/// A table is built once by [`load_table`] (or [`TransactionTable::new`] for
/// already-typed records) and never mutated afterwards. Replacing a snapshot
/// is the caller's concern; every query runs against a fixed table, so
/// concurrent executions need no coordination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionTable {
    records: Vec<TransactionRecord>,
}

impl TransactionTable {
    /// Create a table from already-typed records.
    #[must_use]
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    /// All records, in load order.
    #[must_use]
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Iterate over the records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    /// Number of rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Build a table snapshot from raw ingestion rows.
///
/// Applies the null-coercion rules of [`TransactionRecord::from_raw`]: rows
/// with a malformed date or amount are kept with that field set to `None`,
/// never dropped and never an error.
#[must_use]
pub fn load_table(rows: impl IntoIterator<Item = RawRow>) -> TransactionTable {
    TransactionTable::new(rows.into_iter().map(TransactionRecord::from_raw).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_keeps_malformed_rows() {
        let table = load_table(vec![
            RawRow::new("2024-01-01", "10", "A", "Retail", "P", "Austin", "TX", "Credit"),
            RawRow::new("garbage", "garbage", "B", "Retail", "P", "Austin", "TX", "Debit"),
        ]);
        assert_eq!(table.len(), 2);
        assert!(table.records()[0].date.is_some());
        assert!(table.records()[1].date.is_none());
        assert!(table.records()[1].amount.is_none());
    }

    #[test]
    fn load_preserves_order() {
        let table = load_table(vec![
            RawRow::new("", "", "first", "", "", "", "", ""),
            RawRow::new("", "", "second", "", "", "", "", ""),
            RawRow::new("", "", "third", "", "", "", "", ""),
        ]);
        let ids: Vec<_> = table.iter().map(|r| r.customer_id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }
}
