pub mod error;
pub mod histogram;
pub mod record;
pub mod codec;
pub mod source;
pub mod options;
pub mod analyze;
pub mod decode;
pub mod batch;
pub mod logging;

pub use error::{CodecError, Result};
pub use histogram::Histogram;
pub use record::{Entry, FrequencyRecord};
pub use codec::{ExpansionOrder, expand};
pub use options::CodecOptions;
pub use analyze::analyze_file;
pub use decode::{decode_file, decode_to};
pub use batch::{BatchProcessor, BatchReport};
