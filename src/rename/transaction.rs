//! One rename driven through staging, commit and rollback.
//!
//! Lifecycle:
//!   Pending -> Staged -> Committed            (success)
//!   Pending -> Staged -> RolledBack           (conflict or failed commit, file restored)
//!   Pending -> Staged -> Lost                 (could not restore, file left at temp path)
//!   Committed -> RolledBack                   (undone so another rollback can proceed)
//!
//! Only the coordinator mutates a transaction; commit and rollback live there because
//! they need the destination registry.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::RenameError;
use crate::fs_ops::{try_atomic_move, TempNamer};

use super::outcome::{FinalState, Outcome};
use super::request::RenameRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Pending,
    Staged,
    Committed,
    RolledBack,
    Lost,
}

#[derive(Debug)]
pub struct Transaction {
    request: RenameRequest,
    temp_path: Option<PathBuf>,
    state: State,
    /// Why the rename did not happen.
    error: Option<RenameError>,
    /// Why a Lost transaction could not be restored.
    revert_error: Option<RenameError>,
}

impl Transaction {
    pub fn new(request: RenameRequest) -> Self {
        Self {
            request,
            temp_path: None,
            state: State::Pending,
            error: None,
            revert_error: None,
        }
    }

    pub fn request(&self) -> &RenameRequest {
        &self.request
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn temp_path(&self) -> Option<&Path> {
        self.temp_path.as_deref()
    }

    pub fn error(&self) -> Option<&RenameError> {
        self.error.as_ref()
    }

    pub fn revert_error(&self) -> Option<&RenameError> {
        self.revert_error.as_ref()
    }

    /// Pending -> Staged: move the source aside to a fresh temporary name.
    ///
    /// A no-op request is never staged. On failure the error is recorded and the
    /// transaction stays Pending, which excludes it from commit.
    pub(crate) fn stage(&mut self, namer: &mut TempNamer) {
        if self.state != State::Pending || self.request.is_noop() {
            return;
        }
        let source = self.request.source_path();
        let temp = namer.temp_path_for(source);
        match try_atomic_move("stage", source, &temp) {
            Ok(()) => {
                debug!(arg = %self.request.argument(), temp = %temp.display(), "staged");
                self.temp_path = Some(temp);
                self.state = State::Staged;
            }
            Err(e) => {
                warn!(arg = %self.request.argument(), kind = e.kind(), error = %e, "staging failed");
                self.error = Some(e);
            }
        }
    }

    pub(crate) fn record_error(&mut self, error: RenameError) {
        self.error = Some(error);
    }

    pub(crate) fn mark_committed(&mut self) {
        self.temp_path = None;
        self.state = State::Committed;
    }

    /// Back at the original path.
    pub(crate) fn mark_rolled_back(&mut self) {
        self.temp_path = None;
        self.state = State::RolledBack;
    }

    /// Stuck at the temporary path; the temp path is kept for the report.
    pub(crate) fn mark_lost(&mut self, reason: RenameError) {
        self.state = State::Lost;
        self.revert_error = Some(reason);
    }

    /// Final report entry. A transaction still Pending after an interrupted
    /// batch is reported as not staged because of the interruption.
    pub(crate) fn into_outcome(self, interrupted: bool) -> Outcome {
        let Transaction {
            request,
            temp_path,
            state,
            error,
            revert_error,
        } = self;
        let (state, error) = match state {
            State::Committed => (FinalState::Renamed, None),
            State::Pending if request.is_noop() => (FinalState::Unchanged, None),
            State::Pending => (
                FinalState::NotStaged,
                error.or(interrupted.then_some(RenameError::Interrupted)),
            ),
            State::RolledBack => (FinalState::RolledBack, error),
            State::Staged | State::Lost => (
                FinalState::Lost {
                    temp_path: temp_path.unwrap_or_default(),
                },
                error,
            ),
        };
        Outcome {
            argument: request.argument().to_string(),
            state,
            target_name: Some(request.target_name().to_string()),
            error,
            revert_error,
        }
    }
}
