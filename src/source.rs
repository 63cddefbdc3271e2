//! Input path checks for each operation.
//!
//! | Operation | Accepts                                        |
//! |-----------|------------------------------------------------|
//! | analyze   | regular file, or a symlink resolving to one    |
//! | decode    | regular file only; symlinks are refused        |
//! | batch     | a directory (not a symlink to one)             |

use std::fs;
use std::path::Path;

use crate::error::{CodecError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymlinkPolicy {
    Follow,
    Reject,
}

/// Ensure `path` names a regular file under `policy`.
pub fn require_regular_file(path: &Path, policy: SymlinkPolicy) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| CodecError::source_unavailable(path, e))?;
    let ft = meta.file_type();
    if ft.is_file() {
        return Ok(());
    }
    if ft.is_symlink() {
        return match policy {
            SymlinkPolicy::Reject => Err(CodecError::source_unavailable(
                path,
                "expected a regular file, found a symbolic link",
            )),
            SymlinkPolicy::Follow => match fs::metadata(path) {
                Ok(target) if target.is_file() => Ok(()),
                Ok(_)  => Err(CodecError::source_unavailable(path, "link target is not a regular file")),
                Err(e) => Err(CodecError::source_unavailable(path, e)),
            },
        };
    }
    Err(CodecError::source_unavailable(path, "expected a regular file"))
}

/// Ensure `path` names a directory.
pub fn require_directory(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| CodecError::source_unavailable(path, e))?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(CodecError::source_unavailable(path, "expected a directory"))
    }
}
