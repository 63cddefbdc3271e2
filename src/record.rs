//! Intermediate frequency record: the on-disk artifact.
//!
//! ```text
//! [4 bytes]    unique_count   u32 LE, 0..=256
//! [N bytes]    symbols        ascending byte value
//! [N*4 bytes]  counts         u32 LE, aligned with symbols
//! ```
//!
//! All integers are little-endian regardless of host.  A record written by
//! this crate is always exactly `4 + 5 * N` bytes.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::{CodecError, RecordSection, Result};
use crate::histogram::Histogram;

pub const HEADER_SIZE: usize = 4;
/// Largest legal `unique_count`: one entry per byte value.
pub const MAX_SYMBOLS: usize = 256;

/// One `(symbol, count)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub symbol: u8,
    pub count:  u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyRecord {
    entries: Vec<Entry>,
}

impl FrequencyRecord {
    /// Build the record for `histogram`: present symbols only, ascending.
    pub fn from_histogram(histogram: &Histogram) -> Result<Self> {
        Ok(Self { entries: histogram.entries()? })
    }

    /// Entries in on-disk order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn unique_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all counts, i.e. the length of any expansion of this record.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count as u64).sum()
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.entries.len() * 5
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.entries.len() as u32)?;
        for e in &self.entries {
            writer.write_u8(e.symbol)?;
        }
        for e in &self.entries {
            writer.write_u32::<LittleEndian>(e.count)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out  = Vec::with_capacity(self.encoded_len());
        let mut word = [0u8; 4];
        LittleEndian::write_u32(&mut word, self.entries.len() as u32);
        out.extend_from_slice(&word);
        out.extend(self.entries.iter().map(|e| e.symbol));
        for e in &self.entries {
            LittleEndian::write_u32(&mut word, e.count);
            out.extend_from_slice(&word);
        }
        out
    }

    /// Parse a record from `reader`, consuming exactly the declared arrays.
    ///
    /// Every read is checked: a short header is [`CodecError::MalformedHeader`],
    /// a count above 256 is [`CodecError::UniqueCountOutOfRange`], a short
    /// symbol or count table is [`CodecError::TruncatedRecord`].
    pub fn read<R: Read>(mut reader: R) -> Result<Self> {
        let mut header = [0u8; HEADER_SIZE];
        let got = read_full(&mut reader, &mut header)?;
        if got < HEADER_SIZE {
            return Err(CodecError::MalformedHeader { available: got });
        }
        let unique_count = LittleEndian::read_u32(&header) as usize;
        if unique_count > MAX_SYMBOLS {
            return Err(CodecError::UniqueCountOutOfRange { declared: unique_count });
        }

        let mut symbols = vec![0u8; unique_count];
        let got = read_full(&mut reader, &mut symbols)?;
        if got < symbols.len() {
            return Err(CodecError::TruncatedRecord {
                section:  RecordSection::Symbols,
                expected: symbols.len(),
                actual:   got,
            });
        }

        let mut raw_counts = vec![0u8; unique_count * 4];
        let got = read_full(&mut reader, &mut raw_counts)?;
        if got < raw_counts.len() {
            return Err(CodecError::TruncatedRecord {
                section:  RecordSection::Counts,
                expected: raw_counts.len(),
                actual:   got,
            });
        }
        let mut counts = vec![0u32; unique_count];
        LittleEndian::read_u32_into(&raw_counts, &mut counts);

        let entries = symbols
            .into_iter()
            .zip(counts)
            .map(|(symbol, count)| Entry { symbol, count })
            .collect();
        Ok(Self { entries })
    }

    /// Parse a record held in memory.  Bytes past the declared arrays are
    /// ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let record = Self::read(bytes)?;
        let trailing = bytes.len().saturating_sub(record.encoded_len());
        if trailing > 0 {
            tracing::debug!(trailing, "ignoring bytes after the count table");
        }
        Ok(record)
    }

    /// Read and parse the artifact at `path`.  The whole file is loaded
    /// before parsing, so a failure never leaves a half-built record.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path  = path.as_ref();
        let bytes = fs::read(path).map_err(|e| CodecError::source_unavailable(path, e))?;
        Self::from_bytes(&bytes)
    }
}

impl From<&FrequencyRecord> for Histogram {
    fn from(record: &FrequencyRecord) -> Self {
        Histogram::from(record.entries())
    }
}

/// Fill `buf` from `reader`, stopping early only at end-of-stream.
/// Returns the number of bytes actually read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0)  => break,
            Ok(n)  => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
