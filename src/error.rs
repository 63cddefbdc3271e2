//! Error type shared by every bytefreq operation.
//!
//! Single-file operations surface the first error and stop.  Batch decoding
//! catches per-entry errors and records them in its report instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which array of a frequency record ran short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSection {
    Symbols,
    Counts,
}

impl std::fmt::Display for RecordSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSection::Symbols => f.write_str("symbol table"),
            RecordSection::Counts  => f.write_str("count table"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CodecError {
    /// Input path missing, unreadable, or the wrong kind of file for the
    /// requested operation.
    #[error("Source unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// Output directory could not be created or an artifact could not be
    /// opened or written.
    #[error("Output unavailable: {path}: {source}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fewer than 4 bytes for `unique_count`.
    #[error("Malformed header: need 4 bytes for unique_count, found {available}")]
    MalformedHeader { available: usize },

    /// `unique_count` larger than the 256-symbol alphabet allows.
    #[error("Malformed header: unique_count {declared} exceeds the 256-symbol alphabet")]
    UniqueCountOutOfRange { declared: usize },

    #[error("Truncated record: {section} declares {expected} bytes, only {actual} present")]
    TruncatedRecord {
        section:  RecordSection,
        expected: usize,
        actual:   usize,
    },

    /// A histogram slot does not fit the 32-bit on-disk count field.
    #[error("Count for byte 0x{symbol:02x} ({count}) exceeds the 32-bit count field")]
    CountOverflow { symbol: u8, count: u64 },

    /// The expansion does not fit in memory.
    #[error("Expansion of {total} bytes cannot be buffered in memory")]
    ExpansionTooLarge { total: u64 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    pub(crate) fn source_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CodecError::SourceUnavailable { path: path.into(), reason: reason.to_string() }
    }

    pub(crate) fn output_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CodecError::OutputUnavailable { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
