//! Core types for salescope
//!
//! This crate provides the data model shared by the salescope tools:
//!
//! - [`TransactionRecord`] - One row of the transaction table
//! - [`TransactionTable`] - An immutable snapshot of loaded records
//! - [`RawRow`] - Untyped field tuple handed over by an ingestion layer
//! - [`load_table`] - Coerce raw rows into a table snapshot
//!
//! # Example
//!
//! ```
//! use salescope_core::{load_table, RawRow};
//!
//! let rows = vec![
//!     RawRow::new("2024-03-01", "120.50", "C001", "Retail", "Outdoor Recreation",
//!                 "Austin", "Texas", "Credit Card"),
//!     RawRow::new("not a date", "oops", "C002", "Retail", "Sports Gear",
//!                 "Dallas", "Texas", "Debit Card"),
//! ];
//! let table = load_table(rows);
//!
//! assert_eq!(table.len(), 2);
//! // Malformed date and amount are coerced to None, not rejected.
//! assert!(table.records()[1].date.is_none());
//! assert!(table.records()[1].amount.is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod record;
pub mod table;

pub use record::{RawRow, TransactionRecord};
pub use table::{load_table, TransactionTable};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
