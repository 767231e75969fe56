//! Transactional batch rename: requests, transactions, the destination registry,
//! the coordinator that drives them, and the outcome report.

mod coordinator;
mod outcome;
mod registry;
mod report;
mod request;
mod transaction;

pub use coordinator::{Coordinator, RunOptions};
pub use outcome::{ExitStatus, FinalState, Outcome, Report};
pub use registry::DestinationRegistry;
pub use report::{describe, print_report, Message};
pub use request::RenameRequest;
pub use transaction::{State, Transaction};

use crate::fs_ops::TempNamer;
use crate::shutdown::CancelToken;

/// Rename `requests` as one batch with a fresh temporary-name generator.
pub fn run(requests: Vec<RenameRequest>, options: RunOptions, cancel: CancelToken) -> Report {
    Coordinator::new(requests, options, cancel, TempNamer::new()).run()
}
