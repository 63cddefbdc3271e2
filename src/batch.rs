//! Directory-wide decode.
//!
//! Every regular file directly inside the input directory is treated as a
//! frequency record and expanded into `<output_dir>/<same name>`.  Runs are
//! emitted in [`ExpansionOrder::Positional`] order by default, which differs
//! from single-file decode whenever two symbols have different counts.
//!
//! Failures are per entry: an unreadable or malformed record is logged and
//! recorded in the [`BatchReport`], and the sweep moves on.  Only an
//! unopenable input directory fails the whole run.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::analyze::ensure_output_dir;
use crate::codec::{expand_into, ExpansionOrder};
use crate::error::{CodecError, Result};
use crate::options::CodecOptions;
use crate::record::FrequencyRecord;
use crate::source::require_directory;

/// One successfully decoded directory entry.
#[derive(Debug, Clone)]
pub struct DecodedEntry {
    pub input:         PathBuf,
    pub output:        PathBuf,
    pub bytes_written: u64,
}

/// One directory entry that could not be decoded.
#[derive(Debug)]
pub struct FailedEntry {
    pub input: PathBuf,
    pub error: CodecError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub decoded: Vec<DecodedEntry>,
    pub failed:  Vec<FailedEntry>,
    /// Subdirectories, symlinks and other non-regular entries.
    pub skipped: usize,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn bytes_written(&self) -> u64 {
        self.decoded.iter().map(|d| d.bytes_written).sum()
    }

    /// One-line outcome for the console.  Per-entry failure details are
    /// carried by the `warn` events emitted during the run.
    pub fn summary(&self, order: ExpansionOrder) -> String {
        format!(
            "Batch ({order} order): {} decoded, {} failed, {} skipped, {} bytes written",
            self.decoded.len(),
            self.failed.len(),
            self.skipped,
            self.bytes_written()
        )
    }
}

pub struct BatchProcessor {
    output_dir: PathBuf,
    order:      ExpansionOrder,
}

impl BatchProcessor {
    pub fn new(opts: &CodecOptions) -> Self {
        Self {
            output_dir: opts.output_dir.clone(),
            order:      opts.batch_order,
        }
    }

    pub fn order(&self) -> ExpansionOrder {
        self.order
    }

    /// Decode every regular file in `dir`.
    pub fn run<P: AsRef<Path>>(&self, dir: P) -> Result<BatchReport> {
        let dir = dir.as_ref();
        require_directory(dir)?;
        let entries = fs::read_dir(dir).map_err(|e| CodecError::source_unavailable(dir, e))?;

        // A missing output directory surfaces again as a per-entry failure.
        if let Err(e) = ensure_output_dir(&self.output_dir) {
            tracing::warn!(error = %e, "could not create output directory");
        }

        let mut report = BatchReport::default();
        for entry in entries {
            let entry = match entry {
                Ok(e)  => e,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "unreadable directory entry");
                    report.failed.push(FailedEntry {
                        input: dir.to_owned(),
                        error: CodecError::source_unavailable(dir, e),
                    });
                    continue;
                }
            };
            let input = entry.path();

            // DirEntry::file_type does not follow symlinks.
            let is_regular = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
            if !is_regular {
                tracing::debug!(path = %input.display(), "skipping non-regular entry");
                report.skipped += 1;
                continue;
            }

            let output = self.output_dir.join(entry.file_name());
            tracing::info!(input = %input.display(), "decoding");
            match self.decode_entry(&input, &output) {
                Ok(bytes_written) => {
                    tracing::info!(output = %output.display(), bytes = bytes_written, "saved decoded file");
                    report.decoded.push(DecodedEntry { input, output, bytes_written });
                }
                Err(error) => {
                    tracing::warn!(input = %input.display(), error = %error, "skipping entry");
                    report.failed.push(FailedEntry { input, error });
                }
            }
        }
        Ok(report)
    }

    /// Parse `input` in full, then write its expansion to `output`.
    fn decode_entry(&self, input: &Path, output: &Path) -> Result<u64> {
        let record = FrequencyRecord::from_path(input)?;
        let file = File::create(output).map_err(|e| CodecError::output_unavailable(output, e))?;
        let mut w = BufWriter::new(file);
        expand_into(record.entries(), self.order, &mut w)
            .and_then(|n| w.flush().map(|_| n))
            .map_err(|e| CodecError::output_unavailable(output, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::Histogram;

    fn write_artifact(path: &Path, source: &[u8]) {
        let record = FrequencyRecord::from_histogram(&Histogram::from_bytes(source)).unwrap();
        fs::write(path, record.to_bytes()).unwrap();
    }

    #[test]
    fn subdirectories_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in");
        fs::create_dir_all(input.join("nested")).unwrap();
        write_artifact(&input.join("one"), b"xyzzy");

        let opts = CodecOptions::default().with_output_dir(tmp.path().join("out"));
        let report = BatchProcessor::new(&opts).run(&input).unwrap();
        assert_eq!(report.decoded.len(), 1);
        assert_eq!(report.skipped, 1);
        assert!(report.is_clean());
        assert_eq!(fs::read(tmp.path().join("out").join("one")).unwrap(), b"xyyzz");
    }

    #[test]
    fn malformed_entry_leaves_no_output() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("short"), [1u8]).unwrap();

        let out = tmp.path().join("out");
        let opts = CodecOptions::default().with_output_dir(&out);
        let report = BatchProcessor::new(&opts).run(&input).unwrap();
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].error, CodecError::MalformedHeader { available: 1 }));
        assert!(!out.join("short").exists());
        assert_eq!(
            report.summary(ExpansionOrder::Positional),
            "Batch (positional order): 0 decoded, 1 failed, 0 skipped, 0 bytes written"
        );
    }

    #[test]
    fn file_instead_of_directory_fails_run() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("plain");
        fs::write(&file, b"").unwrap();
        let opts = CodecOptions::default().with_output_dir(tmp.path().join("out"));
        let err = BatchProcessor::new(&opts).run(&file).unwrap_err();
        assert!(matches!(err, CodecError::SourceUnavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in");
        fs::create_dir(&input).unwrap();
        let real = tmp.path().join("real");
        write_artifact(&real, b"aa");
        std::os::unix::fs::symlink(&real, input.join("link")).unwrap();

        let opts = CodecOptions::default().with_output_dir(tmp.path().join("out"));
        let report = BatchProcessor::new(&opts).run(&input).unwrap();
        assert!(report.decoded.is_empty());
        assert_eq!(report.skipped, 1);
    }
}
