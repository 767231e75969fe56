//! Core library for `batch_rename`.
//!
//! Renames many files as one batch. New names come from sed-like expressions
//! (`s///`, `y///`), a format string with numbering, or verbatim input lines.
//! Every source is first staged to a temporary name, so swaps and cycles such as
//! `1.jpg -> 2.jpg, 2.jpg -> 1.jpg` work; a rename that cannot complete is rolled
//! back, and a file that cannot be restored is reported with its temporary path.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod naming;
pub mod output;
pub mod platform;
pub mod rename;
pub mod shutdown;
pub mod transform;

pub use config::{Config, LogLevel};
pub use errors::RenameError;
pub use naming::{Batch, NamingOptions};
pub use rename::{
    Coordinator, DestinationRegistry, ExitStatus, FinalState, Outcome, RenameRequest, Report,
    RunOptions,
};
pub use shutdown::CancelToken;
pub use transform::{ParseError, Pipeline};
