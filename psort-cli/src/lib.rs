//! psort CLI library target.
//!
//! Holds the argument definitions so the `psort` binary and the integration
//! tests share one parser.

pub mod args;

pub use args::{Cli, Invocation};
