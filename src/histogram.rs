//! Byte histogram: the frequency counter.
//!
//! A [`Histogram`] is always built fresh for the stream it describes.  There
//! is no shared accumulator, so analysing several files from one process can
//! never leak counts between them.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{CodecError, Result};
use crate::record::Entry;

/// Read buffer size for [`Histogram::from_reader`].
pub const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Occurrence count per byte value, 256 slots, zero by default.
#[derive(Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl std::fmt::Debug for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter_present()).finish()
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut h = Self::new();
        h.update(data);
        h
    }

    /// Count every byte read from `reader` until end-of-stream.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut h   = Self::new();
        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        loop {
            match reader.read(&mut buf) {
                Ok(0)  => break,
                Ok(n)  => h.update(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(h)
    }

    /// Open `path` and count its bytes.
    ///
    /// Any failure to open or read the file is reported as
    /// [`CodecError::SourceUnavailable`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CodecError::source_unavailable(path, e))?;
        Self::from_reader(file).map_err(|e| CodecError::source_unavailable(path, e))
    }

    pub fn update(&mut self, data: &[u8]) {
        for &b in data {
            self.counts[b as usize] += 1;
        }
    }

    #[inline]
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn counts(&self) -> &[u64; 256] {
        &self.counts
    }

    /// Number of distinct byte values with a non-zero count.
    pub fn unique_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols and their counts, ascending by byte value.
    pub fn iter_present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i as u8, c))
    }

    /// Convert to on-disk entries, ascending by symbol.
    ///
    /// Fails with [`CodecError::CountOverflow`] if any count does not fit in
    /// a `u32`.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        self.iter_present()
            .map(|(symbol, count)| {
                u32::try_from(count)
                    .map(|count| Entry { symbol, count })
                    .map_err(|_| CodecError::CountOverflow { symbol, count })
            })
            .collect()
    }
}

impl From<&[Entry]> for Histogram {
    fn from(entries: &[Entry]) -> Self {
        let mut h = Self::new();
        for e in entries {
            h.counts[e.symbol as usize] += e.count as u64;
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_byte_value() {
        let data: Vec<u8> = (0u8..=255).chain(0u8..=9).collect();
        let h = Histogram::from_bytes(&data);
        assert_eq!(h.unique_count(), 256);
        assert_eq!(h.total(), 266);
        assert_eq!(h.get(0), 2);
        assert_eq!(h.get(9), 2);
        assert_eq!(h.get(10), 1);
        assert_eq!(h.get(255), 1);
    }

    #[test]
    fn reader_spanning_several_chunks() {
        let data = vec![0x7Fu8; READ_CHUNK_SIZE * 2 + 17];
        let h = Histogram::from_reader(data.as_slice()).unwrap();
        assert_eq!(h.get(0x7F), data.len() as u64);
        assert_eq!(h.unique_count(), 1);
    }

    #[test]
    fn empty_stream() {
        let h = Histogram::from_reader(io::empty()).unwrap();
        assert!(h.is_empty());
        assert_eq!(h.unique_count(), 0);
        assert!(h.entries().unwrap().is_empty());
    }

    #[test]
    fn entries_are_ascending() {
        let h = Histogram::from_bytes(b"zebra");
        let symbols: Vec<u8> = h.entries().unwrap().iter().map(|e| e.symbol).collect();
        assert_eq!(symbols, b"aberz");
    }

    #[test]
    fn count_overflow_is_reported() {
        let mut h = Histogram::new();
        h.counts[b'x' as usize] = u32::MAX as u64 + 1;
        match h.entries() {
            Err(CodecError::CountOverflow { symbol, count }) => {
                assert_eq!(symbol, b'x');
                assert_eq!(count, u32::MAX as u64 + 1);
            }
            other => panic!("expected CountOverflow, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = Histogram::from_path(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, CodecError::SourceUnavailable { .. }));
    }
}
