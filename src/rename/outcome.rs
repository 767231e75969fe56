//! Per-argument outcome records and the batch exit status.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::errors::RenameError;

/// Where an argument ended up after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalState {
    /// Renamed to its target.
    Renamed,
    /// Target equals source; nothing to do.
    Unchanged,
    /// Dry run: would be renamed.
    WouldRename,
    /// Staged, not committed, restored to the original path.
    RolledBack,
    /// Never moved (staging failed or the batch was interrupted first).
    NotStaged,
    /// Stuck at a temporary path.
    Lost { temp_path: PathBuf },
    /// Deliberately left alone (blank stdin line, repeated argument).
    Skipped,
    /// No request could be built for the argument.
    Rejected,
}

impl FinalState {
    pub fn severity(&self) -> ExitStatus {
        match self {
            FinalState::Renamed
            | FinalState::Unchanged
            | FinalState::WouldRename
            | FinalState::Skipped => ExitStatus::Success,
            FinalState::RolledBack | FinalState::NotStaged | FinalState::Rejected => {
                ExitStatus::PartialFailure
            }
            FinalState::Lost { .. } => ExitStatus::Lost,
        }
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub argument: String,
    pub state: FinalState,
    pub target_name: Option<String>,
    /// Why the rename did not happen.
    pub error: Option<RenameError>,
    /// For Lost outcomes: why the file could not be restored.
    pub revert_error: Option<RenameError>,
}

impl Outcome {
    /// Outcome decided before any transaction existed.
    pub fn settled(argument: impl Into<String>, state: FinalState, error: Option<RenameError>) -> Self {
        Self {
            argument: argument.into(),
            state,
            target_name: None,
            error,
            revert_error: None,
        }
    }
}

/// Process exit status, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExitStatus {
    Success,
    PartialFailure,
    Usage,
    Interrupted,
    Lost,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::PartialFailure => 1,
            ExitStatus::Usage => 2,
            ExitStatus::Lost => 4,
            ExitStatus::Interrupted => 130,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code() as u8)
    }
}

/// Result of a batch, in argument order.
#[derive(Debug, Default)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    pub interrupted: bool,
}

impl Report {
    /// Slot outcomes decided before the batch ran back into argument order.
    /// `settled` holds (final position, outcome) pairs sorted by position.
    pub fn merge_settled(&mut self, settled: Vec<(usize, Outcome)>) {
        for (position, outcome) in settled {
            let at = position.min(self.outcomes.len());
            self.outcomes.insert(at, outcome);
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        let worst = self
            .outcomes
            .iter()
            .map(|o| o.state.severity())
            .max()
            .unwrap_or(ExitStatus::Success);
        if self.interrupted {
            worst.max(ExitStatus::Interrupted)
        } else {
            worst
        }
    }

    pub fn lost(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.state, FinalState::Lost { .. }))
    }
}
