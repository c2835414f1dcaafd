//! Command-line parsing.

use clap::Parser;
use psort_core::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "psort")]
#[command(about = "Sorts contiguous blocks of `use ...;` statements in place", long_about = None)]
pub struct Cli {
    /// Config file. Required in directory mode; single-file mode falls back to
    /// defaults when it is missing or malformed.
    #[arg(short = 'c', long = "config", value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Sort only this file, ignoring include/exclude patterns. Without it,
    /// every selected file under the current directory is sorted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    SingleFile { config: PathBuf, file: PathBuf },
    Directory { config: PathBuf },
}

impl Cli {
    pub fn invocation(self) -> Invocation {
        match self.file {
            Some(file) => Invocation::SingleFile {
                config: self.config,
                file,
            },
            None => Invocation::Directory {
                config: self.config,
            },
        }
    }
}
