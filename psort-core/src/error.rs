use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PsortError>;

/// The step of a file rewrite that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    Open,
    Metadata,
    CreateScratch,
    Read,
    Write,
    Permissions,
    Rename,
}

impl std::fmt::Display for FileOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FileOp::Open => "open",
            FileOp::Metadata => "stat",
            FileOp::CreateScratch => "create scratch file for",
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::Permissions => "copy permissions onto",
            FileOp::Rename => "replace",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum PsortError {
    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Per-file failure. The original file is left untouched.
    #[error("failed to {op} {path:?}: {source}")]
    File {
        path: PathBuf,
        op: FileOp,
        #[source]
        source: io::Error,
    },

    #[error("directory walk failed: {0}")]
    Traversal(#[from] walkdir::Error),

    #[error("worker for {path:?} did not finish: {source}")]
    Worker {
        path: PathBuf,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl PsortError {
    pub fn file(path: impl Into<PathBuf>, op: FileOp, source: io::Error) -> Self {
        PsortError::File {
            path: path.into(),
            op,
            source,
        }
    }

    /// The operation that failed, for per-file errors.
    pub fn file_op(&self) -> Option<FileOp> {
        match self {
            PsortError::File { op, .. } => Some(*op),
            _ => None,
        }
    }
}
