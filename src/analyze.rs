//! Single-file analysis: histogram a source file and persist its record.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{CodecError, Result};
use crate::histogram::Histogram;
use crate::options::CodecOptions;
use crate::record::FrequencyRecord;
use crate::source::{require_regular_file, SymlinkPolicy};

/// What [`analyze_file`] produced.
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    pub source:       PathBuf,
    pub output:       PathBuf,
    pub total_bytes:  u64,
    pub unique_count: usize,
}

/// Analyse `path` and write its record to `opts.analysis_path()`.
///
/// The source is fully read and the record built before the output
/// directory is touched, so a source or overflow error leaves no artifact.
pub fn analyze_file<P: AsRef<Path>>(path: P, opts: &CodecOptions) -> Result<AnalysisSummary> {
    let path = path.as_ref();
    require_regular_file(path, SymlinkPolicy::Follow)?;

    let histogram = Histogram::from_path(path)?;
    let record    = FrequencyRecord::from_histogram(&histogram)?;
    let output    = write_record(&record, &opts.output_dir, &opts.analysis_name)?;

    tracing::info!(
        source = %path.display(),
        output = %output.display(),
        bytes = histogram.total(),
        unique = record.unique_count(),
        "analysis saved"
    );
    Ok(AnalysisSummary {
        source:       path.to_owned(),
        output,
        total_bytes:  histogram.total(),
        unique_count: record.unique_count(),
    })
}

/// Persist `record` as `dir/name`, creating `dir` if needed.
pub fn write_record(record: &FrequencyRecord, dir: &Path, name: &str) -> Result<PathBuf> {
    ensure_output_dir(dir)?;
    let out_path = dir.join(name);
    let file = File::create(&out_path).map_err(|e| CodecError::output_unavailable(&out_path, e))?;
    let mut w = BufWriter::new(file);
    record
        .write(&mut w)
        .and_then(|_| w.flush())
        .map_err(|e| CodecError::output_unavailable(&out_path, e))?;
    Ok(out_path)
}

pub(crate) fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| CodecError::output_unavailable(dir, e))
}
