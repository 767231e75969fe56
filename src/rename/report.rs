//! Turn outcomes into user-facing lines.
//!
//! Listings ("ARG: NEW_NAME") go to stdout so they can be scripted against;
//! failures and notices go to stderr.

use crate::output::{self as out, short_path};

use super::outcome::{FinalState, Outcome, Report};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// `ARG: NEW_NAME`
    Listing(String),
    /// Something the user asked to hear about in verbose mode.
    Notice(String),
    Failure(String),
}

/// Lines for one outcome. Successful renames are listed only when `verbose`;
/// dry-run listings are always shown.
pub fn describe(outcome: &Outcome, verbose: bool) -> Vec<Message> {
    let arg = &outcome.argument;
    let reason = || {
        outcome
            .error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "not attempted".to_string())
    };
    let listing = || {
        Message::Listing(format!(
            "{arg}: {}",
            outcome.target_name.as_deref().unwrap_or_default()
        ))
    };

    match &outcome.state {
        FinalState::Renamed if verbose => vec![listing()],
        FinalState::WouldRename => vec![listing()],
        FinalState::Renamed | FinalState::Unchanged => Vec::new(),
        FinalState::Skipped if verbose => vec![Message::Notice(format!("{arg} skipped: {}", reason()))],
        FinalState::Skipped => Vec::new(),
        FinalState::RolledBack | FinalState::NotStaged | FinalState::Rejected => {
            vec![Message::Failure(format!("{arg} not renamed: {}", reason()))]
        }
        FinalState::Lost { temp_path } => {
            let revert = outcome
                .revert_error
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "unknown error".to_string());
            vec![
                Message::Failure(format!("{arg} not renamed: {}", reason())),
                Message::Failure(format!("could not revert {}: {revert}", short_path(temp_path))),
            ]
        }
    }
}

/// Print every outcome in order.
pub fn print_report(report: &Report, verbose: bool) {
    for outcome in &report.outcomes {
        for message in describe(outcome, verbose) {
            match message {
                Message::Listing(line) => out::print_user(&line),
                Message::Notice(line) => out::print_warn(&line),
                Message::Failure(line) => out::print_error(&line),
            }
        }
    }
    if report.interrupted {
        out::print_warn("batch interrupted; unfinished renames were reverted");
    }
}
