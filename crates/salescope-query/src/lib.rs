//! Query catalog engine for the salescope transaction table.
//!
//! This crate answers a fixed catalog of 35 business questions over a loaded
//! [`TransactionTable`](salescope_core::TransactionTable): sums, means,
//! counts, group-bys, filtered subsets, time buckets and comparative slices.
//! The catalog is static and closed; entries are addressed by a stable id
//! and every definition is a total, pure function of the table.
//!
//! # Example
//!
//! ```
//! use salescope_core::{load_table, RawRow};
//! use salescope_query::{Executor, QueryResult, Value};
//!
//! let table = load_table(vec![
//!     RawRow::new("2024-01-05", "100", "A", "Retail", "Sports Gear",
//!                 "Austin", "Texas", "Credit Card"),
//!     RawRow::new("2024-01-09", "250", "B", "Food", "Groceries",
//!                 "Dallas", "Texas", "Debit Card"),
//! ]);
//!
//! let executor = Executor::new(&table);
//! let result = executor.execute(1).unwrap();
//! assert!(matches!(result, QueryResult::Scalar { .. }));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod executor;
pub mod primitives;
pub mod value;

pub use catalog::{catalog, find, QueryDef};
pub use error::QueryError;
pub use executor::{definitions, list_queries, Executor};
pub use value::{QueryResult, Value};
