//! Salescope CLI tools.
//!
//! This crate provides command-line tools for analyzing a transactional
//! sales CSV with the salescope query catalog:
//!
//! - `salescope-query`: Run one catalog query (or list the catalog)
//! - `salescope-report`: Run the full catalog as a report
//!
//! # Example Usage
//!
//! ```bash
//! salescope-query transactions.csv --list
//! salescope-query transactions.csv 19 -f json
//! salescope-report transactions.csv
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod importer;
pub mod render;
