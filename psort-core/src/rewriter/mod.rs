//! Streaming file rewriter.
//!
//! Drives a [`BlockScanner`] over a `BufRead`, writing every emitted line to
//! a `Write` followed by `\n`. Lines are handled as raw bytes, so files in any
//! ASCII-compatible encoding pass through. Everything outside statement blocks
//! comes out exactly as it went in (apart from line terminators, which are
//! normalized).

pub mod scanner;

pub use scanner::{BlockScanner, LineKind, ScanState};

use std::io::{self, BufRead, Write};
use std::path::Path;

use thiserror::Error;

use crate::atomic;
use crate::error::{FileOp, PsortError, Result};
use crate::sorter::BlockSorter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub lines_read: usize,
    pub blocks_sorted: usize,
}

/// Which side of the stream failed.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

impl StreamError {
    pub fn into_file_error(self, path: &Path) -> PsortError {
        match self {
            StreamError::Read(e) => PsortError::file(path, FileOp::Read, e),
            StreamError::Write(e) => PsortError::file(path, FileOp::Write, e),
        }
    }
}

pub fn rewrite_stream<R, W>(
    mut reader: R,
    writer: &mut W,
    sorter: &BlockSorter,
) -> std::result::Result<RewriteStats, StreamError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let mut scanner = BlockScanner::new(sorter);
    let mut out = Vec::new();
    let mut lines_read = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).map_err(StreamError::Read)? == 0 {
            break;
        }
        lines_read += 1;
        scanner.feed(strip_terminator(&buf).to_vec(), &mut out);
        write_lines(writer, &mut out).map_err(StreamError::Write)?;
    }

    scanner.finish(&mut out);
    write_lines(writer, &mut out).map_err(StreamError::Write)?;
    writer.flush().map_err(StreamError::Write)?;

    Ok(RewriteStats {
        lines_read,
        blocks_sorted: scanner.blocks_sorted(),
    })
}

/// Drop a trailing `\n` or `\r\n`.
fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn write_lines<W: Write + ?Sized>(writer: &mut W, lines: &mut Vec<Vec<u8>>) -> io::Result<()> {
    for line in lines.drain(..) {
        writer.write_all(&line)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// In-memory rewrite over raw bytes. Every output line ends with `\n`.
pub fn rewrite_bytes(input: &[u8], sorter: &BlockSorter) -> Vec<u8> {
    let mut out = Vec::new();
    let mut scanner = BlockScanner::new(sorter);
    for line in input.split_inclusive(|&b| b == b'\n') {
        scanner.feed(strip_terminator(line).to_vec(), &mut out);
    }
    scanner.finish(&mut out);

    let mut bytes = Vec::with_capacity(input.len() + 1);
    for line in out {
        bytes.extend_from_slice(&line);
        bytes.push(b'\n');
    }
    bytes
}

/// [`rewrite_bytes`] for text already in memory.
pub fn rewrite_str(input: &str, sorter: &BlockSorter) -> String {
    let bytes = rewrite_bytes(input.as_bytes(), sorter);
    // Only whole lines move and separators are ASCII, so valid UTF-8 stays valid.
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Rewrite `path` in place through the atomic replace protocol.
pub fn rewrite_file(path: &Path, sorter: &BlockSorter) -> Result<RewriteStats> {
    let mut stats = RewriteStats::default();
    atomic::replace_file(path, |reader, writer| {
        stats = rewrite_stream(reader, writer, sorter).map_err(|e| e.into_file_error(path))?;
        Ok(())
    })?;
    Ok(stats)
}
