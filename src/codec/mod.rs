//! Expansion of a frequency record back into bytes.
//!
//! # Orders
//! A record carries no positional information, so "decoding" is the
//! expansion of a byte multiset: each entry's symbol is repeated `count`
//! times, one run per entry.  Only the order of the runs is a choice:
//!
//! | Order        | Run order                                    | Used by |
//! |--------------|----------------------------------------------|---------|
//! | `Rank`       | count descending, ties by symbol ascending   | `decode` |
//! | `Positional` | as stored on disk (ascending symbol)         | `batch`  |
//!
//! Both orders emit the same multiset; only the grouping differs.

use std::io::{self, Write};

use crate::error::{CodecError, Result};
use crate::record::Entry;

/// Run-ordering rule applied before expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionOrder {
    /// Most frequent symbol first; ties broken by lower byte value.
    #[default]
    Rank,
    /// On-disk entry order.
    Positional,
}

impl ExpansionOrder {
    /// Human-readable name (for diagnostics and CLI parsing).
    pub fn name(self) -> &'static str {
        match self {
            ExpansionOrder::Rank       => "rank",
            ExpansionOrder::Positional => "positional",
        }
    }

    /// Parse from a CLI string.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rank"       => Some(ExpansionOrder::Rank),
            "positional" => Some(ExpansionOrder::Positional),
            _            => None,
        }
    }

    /// Return `entries` rearranged into this order.
    pub fn arrange(self, entries: &[Entry]) -> Vec<Entry> {
        let mut out = entries.to_vec();
        if self == ExpansionOrder::Rank {
            sort_by_rank(&mut out);
        }
        out
    }
}

impl std::fmt::Display for ExpansionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort into rank order: count descending, symbol ascending on ties.
pub fn sort_by_rank(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.symbol.cmp(&b.symbol)));
}

/// Length of any expansion of `entries`.
pub fn expanded_len(entries: &[Entry]) -> u64 {
    entries.iter().map(|e| e.count as u64).sum()
}

/// Expand `entries` in `order` into a new buffer.
///
/// A 1284-byte record can declare close to 1.1 TB of output, so the buffer
/// is reserved fallibly; [`CodecError::ExpansionTooLarge`] is returned when
/// it cannot be allocated.  Use [`expand_into`] to stream instead.
pub fn expand(entries: &[Entry], order: ExpansionOrder) -> Result<Vec<u8>> {
    let total = expanded_len(entries);
    let too_large = || CodecError::ExpansionTooLarge { total };
    let len = usize::try_from(total).map_err(|_| too_large())?;
    let mut out = Vec::new();
    out.try_reserve_exact(len).map_err(|_| too_large())?;
    for e in order.arrange(entries) {
        out.resize(out.len() + e.count as usize, e.symbol);
    }
    Ok(out)
}

/// Size of the run buffer used by [`expand_into`].
const RUN_CHUNK: usize = 8 * 1024;

/// Stream the expansion of `entries` into `writer` without materialising
/// the whole output.  Returns the number of bytes written.
pub fn expand_into<W: Write>(entries: &[Entry], order: ExpansionOrder, mut writer: W) -> io::Result<u64> {
    let mut written = 0u64;
    let mut run = [0u8; RUN_CHUNK];
    for e in order.arrange(entries) {
        run.fill(e.symbol);
        let mut remaining = e.count as usize;
        while remaining > 0 {
            let n = remaining.min(RUN_CHUNK);
            writer.write_all(&run[..n])?;
            remaining -= n;
        }
        written += e.count as u64;
    }
    Ok(written)
}
