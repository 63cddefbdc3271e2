//! Single-file decode: parse a record and expand it in rank order.

use std::io::Write;
use std::path::Path;

use crate::codec::{expand, expand_into, ExpansionOrder};
use crate::error::Result;
use crate::record::FrequencyRecord;
use crate::source::{require_regular_file, SymlinkPolicy};

/// Load the record at `path`.  Symlinks are refused.
pub fn load_record<P: AsRef<Path>>(path: P) -> Result<FrequencyRecord> {
    let path = path.as_ref();
    require_regular_file(path, SymlinkPolicy::Reject)?;
    FrequencyRecord::from_path(path)
}

/// Decode the record at `path` into memory.
///
/// Fails with [`CodecError::ExpansionTooLarge`](crate::CodecError::ExpansionTooLarge)
/// when the declared total cannot be buffered; [`decode_to`] streams instead.
pub fn decode_file<P: AsRef<Path>>(path: P, order: ExpansionOrder) -> Result<Vec<u8>> {
    let record = load_record(&path)?;
    expand(record.entries(), order)
}

/// Decode the record at `path` straight into `writer`.
///
/// The record is parsed in full before the first byte is written, so a
/// header or truncation error leaves `writer` untouched.  Returns the number
/// of bytes written.
pub fn decode_to<P: AsRef<Path>, W: Write>(path: P, order: ExpansionOrder, mut writer: W) -> Result<u64> {
    let path   = path.as_ref();
    let record = load_record(path)?;
    tracing::debug!(
        path = %path.display(),
        unique = record.unique_count(),
        total = record.total(),
        %order,
        "decoding record"
    );
    let written = expand_into(record.entries(), order, &mut writer)?;
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use std::fs;

    #[test]
    fn header_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad");
        fs::write(&bad, [7u8, 0]).unwrap();
        let mut out = Vec::new();
        let err = decode_to(&bad, ExpansionOrder::Rank, &mut out).unwrap_err();
        assert!(matches!(err, CodecError::MalformedHeader { available: 2 }));
        assert!(out.is_empty());
    }

    #[test]
    fn truncated_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad");
        // Two symbols declared, one count present.
        fs::write(&bad, [2u8, 0, 0, 0, b'a', b'b', 9, 0, 0, 0]).unwrap();
        let mut out = Vec::new();
        let err = decode_to(&bad, ExpansionOrder::Rank, &mut out).unwrap_err();
        assert!(matches!(err, CodecError::TruncatedRecord { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn huge_declared_total_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge");
        let mut bytes = vec![0u8, 1, 0, 0];
        bytes.extend(0..=255u8);
        for _ in 0..256 {
            bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        }
        fs::write(&path, &bytes).unwrap();

        let err = decode_file(&path, ExpansionOrder::Rank).unwrap_err();
        assert!(matches!(err, CodecError::ExpansionTooLarge { .. }), "{err}");
    }

    #[test]
    fn directory_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_file(dir.path(), ExpansionOrder::Rank).unwrap_err();
        assert!(matches!(err, CodecError::SourceUnavailable { .. }));
    }
}
