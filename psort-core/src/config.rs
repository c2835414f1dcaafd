//! Run configuration.
//!
//! Loaded once per run from `psort.json` (or `--config`), then shared
//! read-only with every worker behind an `Arc`.

use serde::Deserialize;
use std::path::Path;

use crate::error::{PsortError, Result};

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "psort.json";

/// Upper bound on files being rewritten at once.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 100;

/// The wildcard entry of a group table.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Glob patterns selecting files in directory mode.
    pub include: Vec<String>,
    /// Glob patterns (or bare directory names) removed from directory mode.
    pub exclude: Vec<String>,
    /// Ordered import prefixes. `*` marks the fallback group.
    pub groups: Vec<String>,
    /// Emit one blank line between adjacent groups.
    pub newline_between_groups: bool,
    /// Files rewritten at once in directory mode (default 100; 0 is clamped to 1).
    pub max_in_flight: usize,
    /// Block-introducer keyword, followed by a space on every statement line.
    pub keyword: String,
    /// Suffix that ends every statement line (default `;`).
    pub terminator: String,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            groups: Vec::new(),
            newline_between_groups: false,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            keyword: "use".to_string(),
            terminator: ";".to_string(),
        }
    }
}

impl SortConfig {
    /// Read and parse a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PsortError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| PsortError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Single-file mode: a missing or broken config is not fatal.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_json(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Admission bound for the worker pool, never zero.
    pub fn concurrency(&self) -> usize {
        self.max_in_flight.max(1)
    }

    /// The literal a statement line starts with, e.g. `"use "`.
    pub fn statement_prefix(&self) -> String {
        format!("{} ", self.keyword)
    }
}
