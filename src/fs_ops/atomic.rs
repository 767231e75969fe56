//! Rename primitive.
//! - Performs a same-directory (or same-device) rename with context-rich errors.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::path::Path;

use crate::errors::RenameError;
use crate::output::short_path;

use super::helpers::io_error_with_help;

/// Move `src` to `dst` with `rename(2)`. `op` names the step for error messages.
/// An existing `dst` file is replaced; callers decide whether that is allowed.
pub fn try_atomic_move(op: &str, src: &Path, dst: &Path) -> Result<(), RenameError> {
    let what = format!("{op} '{}' ->", short_path(src));
    fs::rename(src, dst).map_err(io_error_with_help(&what, dst))?;

    // Unix: fsync the destination directory to persist the rename (best-effort).
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
