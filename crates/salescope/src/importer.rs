//! CSV ingestion for the transaction table.
//!
//! The core crates never touch CSV; this module owns header normalization,
//! column mapping and the handoff of raw field tuples to
//! [`salescope_core::load_table`]. Type coercion (date, amount) lives in the
//! core so every ingestion path shares the same null rules.

use anyhow::{Context, Result};
use salescope_core::{load_table, RawRow, TransactionTable};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Accepted header names per field, first match wins. The first alias in
/// each list is the column name of the original dataset export.
const DATE_COLUMNS: &[&str] = &["t_date", "date", "transaction_date"];
const AMOUNT_COLUMNS: &[&str] = &["t_amt", "amount", "transaction_amount"];
const CUSTOMER_COLUMNS: &[&str] = &["cust_id", "customer_id", "customer"];
const CATEGORY_COLUMNS: &[&str] = &["services", "service_category", "category"];
const PRODUCT_COLUMNS: &[&str] = &["products_used", "product_subtype", "product"];
const CITY_COLUMNS: &[&str] = &["city"];
const STATE_COLUMNS: &[&str] = &["state"];
const PAYMENT_COLUMNS: &[&str] = &["t_details", "payment_detail", "payment"];

/// Resolved column indices for one CSV layout.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date: usize,
    amount: usize,
    customer: usize,
    category: usize,
    product: usize,
    city: usize,
    state: usize,
    payment: usize,
}

impl ColumnMap {
    /// Resolve the eight required columns from normalized headers.
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let lookup = |aliases: &[&str], what: &str| -> Result<usize> {
            aliases
                .iter()
                .find_map(|name| index.get(*name).copied())
                .with_context(|| format!("missing {what} column (expected one of {aliases:?})"))
        };

        Ok(Self {
            date: lookup(DATE_COLUMNS, "date")?,
            amount: lookup(AMOUNT_COLUMNS, "amount")?,
            customer: lookup(CUSTOMER_COLUMNS, "customer")?,
            category: lookup(CATEGORY_COLUMNS, "service category")?,
            product: lookup(PRODUCT_COLUMNS, "product subtype")?,
            city: lookup(CITY_COLUMNS, "city")?,
            state: lookup(STATE_COLUMNS, "state")?,
            payment: lookup(PAYMENT_COLUMNS, "payment detail")?,
        })
    }

    fn raw_row(&self, record: &csv::StringRecord) -> RawRow {
        let field = |i: usize| record.get(i).unwrap_or_default();
        RawRow::new(
            field(self.date),
            field(self.amount),
            field(self.customer),
            field(self.category),
            field(self.product),
            field(self.city),
            field(self.state),
            field(self.payment),
        )
    }
}

/// Load a transaction table from a CSV file.
pub fn import_file(path: &Path) -> Result<TransactionTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_string(&content)
}

/// Load a transaction table from CSV content.
///
/// Rows that fail to parse as CSV are skipped; rows with malformed date or
/// amount fields are kept with those fields nulled, per the core's coercion
/// rules.
pub fn import_string(content: &str) -> Result<TransactionTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let columns = ColumnMap::resolve(reader.headers()?)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(columns.raw_row(&record)),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(skipped, "skipped unreadable CSV rows");
    }

    let table = load_table(rows);
    debug!(rows = table.len(), "loaded transaction table");
    Ok(table)
}
