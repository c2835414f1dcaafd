//! # psort core
//!
//! Rewrites source files in place so that each contiguous block of
//! single-line `use ...;` statements is sorted by a configurable group table,
//! leaving every other line untouched.
//!
//! Data flow: [`filter`] selects paths → [`coordinator`] fans out →
//! [`rewriter`] detects blocks and hands them to [`sorter`] → [`atomic`]
//! swaps the result into place.

pub mod atomic;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod rewriter;
pub mod sorter;
pub mod walker;

// Re-export the main entry points so callers can just use `psort_core::run_directory`
pub use config::SortConfig;
pub use coordinator::{
    FileJob, FileOutcome, RunReport, process_all, process_all_with, process_single, run_directory,
};
pub use error::{FileOp, PsortError, Result};
pub use filter::PathFilter;
pub use rewriter::{RewriteStats, rewrite_bytes, rewrite_file, rewrite_str};
pub use sorter::{BlockSorter, GroupTable, StatementSyntax};
