//! Immutable description of one requested rename.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    argument: String,
    source_path: PathBuf,
    target_name: String,
    target_path: PathBuf,
}

impl RenameRequest {
    /// Rename within the source's directory: `target_path = parent(source) / target_name`.
    /// `source_path` must be absolute.
    pub fn new(argument: impl Into<String>, source_path: PathBuf, target_name: impl Into<String>) -> Self {
        let target_name = target_name.into();
        let target_path = source_path
            .parent()
            .map(|dir| dir.join(&target_name))
            .unwrap_or_else(|| PathBuf::from(&target_name));
        Self {
            argument: argument.into(),
            source_path,
            target_name,
            target_path,
        }
    }

    /// Rename to an explicit destination (verbatim stdin pairing).
    pub fn with_target_path(argument: impl Into<String>, source_path: PathBuf, target_path: PathBuf) -> Self {
        let target_name = target_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            argument: argument.into(),
            source_path,
            target_name,
            target_path,
        }
    }

    /// The argument exactly as given on the command line.
    pub fn argument(&self) -> &str {
        &self.argument
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Source and target are the same path.
    pub fn is_noop(&self) -> bool {
        self.source_path == self.target_path
    }
}
