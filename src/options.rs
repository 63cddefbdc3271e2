//! Run-time configuration shared by the analyze, decode and batch paths.

use std::path::{Path, PathBuf};

use crate::codec::ExpansionOrder;

/// Default directory for every artifact this crate writes.
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
/// Fixed artifact name written by single-file analysis.
pub const ANALYSIS_FILE_NAME: &str = "analysis";

/// Configuration for [`crate::analyze::analyze_file`],
/// [`crate::decode::decode_file`] and [`crate::batch::BatchProcessor`].
#[derive(Debug, Clone)]
pub struct CodecOptions {
    pub output_dir:    PathBuf,
    pub analysis_name: String,
    /// Run order for single-file decode.
    pub decode_order:  ExpansionOrder,
    /// Run order for batch decode.
    pub batch_order:   ExpansionOrder,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            output_dir:    PathBuf::from(DEFAULT_OUTPUT_DIR),
            analysis_name: ANALYSIS_FILE_NAME.to_owned(),
            decode_order:  ExpansionOrder::Rank,
            batch_order:   ExpansionOrder::Positional,
        }
    }
}

impl CodecOptions {
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_owned();
        self
    }

    /// Override the run order of both decode paths.
    pub fn with_order(mut self, order: ExpansionOrder) -> Self {
        self.decode_order = order;
        self.batch_order  = order;
        self
    }

    pub fn analysis_path(&self) -> PathBuf {
        self.output_dir.join(&self.analysis_name)
    }
}
