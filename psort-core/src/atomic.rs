//! Crash-safe in-place replacement.
//!
//! The new content is written to a scratch file next to the target, given
//! the target's permission bits, synced, then renamed over the target. Until
//! that rename succeeds the original is never opened for writing. On any
//! error the scratch file is removed when its guard drops.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{FileOp, PsortError, Result};

pub const SCRATCH_PREFIX: &str = ".psort-";
pub const SCRATCH_SUFFIX: &str = ".tmp";

/// Replace `path` with whatever `producer` writes, given a reader over the
/// current content.
pub fn replace_file<F>(path: &Path, producer: F) -> Result<()>
where
    F: FnOnce(&mut dyn BufRead, &mut dyn Write) -> Result<()>,
{
    let original = File::open(path).map_err(|e| PsortError::file(path, FileOp::Open, e))?;
    let permissions = original
        .metadata()
        .map_err(|e| PsortError::file(path, FileOp::Metadata, e))?
        .permissions();

    let scratch = create_scratch(path)?;

    {
        let mut reader = BufReader::new(original);
        let mut writer = BufWriter::new(scratch.as_file());
        producer(&mut reader, &mut writer)?;
        writer
            .flush()
            .map_err(|e| PsortError::file(path, FileOp::Write, e))?;
    }

    scratch
        .as_file()
        .sync_all()
        .map_err(|e| PsortError::file(path, FileOp::Write, e))?;

    fs::set_permissions(scratch.path(), permissions)
        .map_err(|e| PsortError::file(path, FileOp::Permissions, e))?;

    // On failure the error hands the guard back; dropping it deletes the file.
    scratch
        .persist(path)
        .map_err(|e| PsortError::file(path, FileOp::Rename, e.error))?;

    Ok(())
}

/// Scratch files live in the target's directory so the rename never crosses
/// a filesystem boundary.
fn create_scratch(path: &Path) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .suffix(SCRATCH_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| PsortError::file(path, FileOp::CreateScratch, e))
}
