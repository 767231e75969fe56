//! I/O helper utilities.
//!
//! Enriches io::Error with the operation, the path involved and an actionable hint,
//! producing a `RenameError::Io` suitable for a per-file outcome.
//!
//! Usage:
//!   fs::rename(src, dst).map_err(io_error_with_help("commit", dst))?;

use std::io;
use std::path::Path;

use crate::errors::RenameError;
use crate::output::short_path;

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, short_path(path), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str("; permission denied, check ownership and write permissions");
                }
                libc::EXDEV => {
                    msg.push_str("; cross-filesystem, rename cannot move between devices");
                }
                libc::EBUSY => {
                    msg.push_str("; resource busy, the file may be in use");
                }
                libc::ENOENT => {
                    msg.push_str("; path not found, verify it exists");
                }
                libc::EEXIST | libc::ENOTEMPTY => {
                    msg.push_str("; already exists, remove the target or use --force");
                }
                libc::EISDIR | libc::ENOTDIR => {
                    msg.push_str("; cannot replace a directory with a file or vice versa");
                }
                libc::EROFS => {
                    msg.push_str("; read-only filesystem, cannot rename here");
                }
                libc::ELOOP => {
                    msg.push_str("; too many symbolic link levels, possible symlink cycle");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str("; file name or path too long, shorten the new name");
                }
                libc::EINVAL => {
                    msg.push_str("; invalid rename, a directory cannot move inside itself");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str("; access denied, check permissions"),
                17 => msg.push_str("; not same device, rename cannot move between drives"),
                32 => msg.push_str("; sharing violation, file is in use"),
                2 | 3 => msg.push_str("; path not found, verify it exists"),
                80 | 183 => msg.push_str("; already exists, remove the target or use --force"),
                206 => msg.push_str("; file name or path too long"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {code}]"));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str("; permission denied, check ownership and write permissions");
            }
            io::ErrorKind::NotFound => {
                msg.push_str("; path not found, verify it exists");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str("; already exists, remove the target or use --force");
            }
            _ => {}
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> RenameError.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> RenameError + 'a {
    move |e: io::Error| RenameError::Io {
        message: build_message(op, path, &e),
        source: e,
    }
}
