//! Lexical path handling for file arguments.

use std::path::{Component, Path, PathBuf};

/// True when nothing is left of `arg` once trailing separators are stripped.
pub fn is_blank(arg: &Path) -> bool {
    arg.components().all(|c| matches!(c, Component::RootDir))
}

/// Make `path` absolute against `cwd` and drop `.`/`..` lexically.
/// Symlinks are not resolved, so a symlink argument names the link itself.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                if out.parent().is_some() {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Split a file name into stem and extension at the last dot.
/// Leading dots belong to the stem, so `.bashrc` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let body = name.trim_start_matches('.');
    let offset = name.len() - body.len();
    match body.rfind('.') {
        Some(dot) => name.split_at(offset + dot),
        None => (name, ""),
    }
}
