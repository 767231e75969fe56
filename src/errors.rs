//! Typed per-file error definitions for batch_rename.
//! None of these abort a batch; they end up in the outcome record of one argument.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::output::short_path;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("{} exists", short_path(.0))]
    TargetExists(PathBuf),

    #[error("original location exists: {}", short_path(.0))]
    OriginalOccupied(PathBuf),

    #[error("temporary file disappeared: {}", short_path(.0))]
    TempVanished(PathBuf),

    #[error("reverted to make room for `{0}`")]
    Displaced(String),

    #[error("no input")]
    NoInput,

    #[error("empty line")]
    EmptyLine,

    #[error("duplicate argument")]
    Duplicate,

    #[error("invalid file argument")]
    InvalidArgument,

    #[error("file name is not valid UTF-8")]
    NonUtf8Name,

    #[error("new name is empty")]
    EmptyName,

    #[error("operation interrupted")]
    Interrupted,
}

impl RenameError {
    /// Stable short name used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RenameError::Io { .. } => "io",
            RenameError::TargetExists(_) => "target_exists",
            RenameError::OriginalOccupied(_) => "original_occupied",
            RenameError::TempVanished(_) => "temp_vanished",
            RenameError::Displaced(_) => "displaced",
            RenameError::NoInput => "no_input",
            RenameError::EmptyLine => "empty_line",
            RenameError::Duplicate => "duplicate",
            RenameError::InvalidArgument => "invalid_argument",
            RenameError::NonUtf8Name => "non_utf8_name",
            RenameError::EmptyName => "empty_name",
            RenameError::Interrupted => "interrupted",
        }
    }

    /// Underlying OS error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            RenameError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
