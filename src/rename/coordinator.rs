//! Two-phase batch rename.
//!
//! Phase 1 stages every source to a temporary name in its own directory, which
//! clears all requested source names before any target is claimed. Phase 2 commits
//! in request order. A refused or failed commit rolls back; rollback may undo one
//! committed transaction that sits on the original path, but never moves a file
//! the batch did not put there.
//!
//! The abort sweep over staged transactions runs exactly once, from `finish` or
//! from `Drop`, whichever comes first.

use std::collections::HashSet;
use std::fs;
use std::mem;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::errors::RenameError;
use crate::fs_ops::{io_error_with_help, lexists, try_atomic_move, TempNamer};
use crate::shutdown::CancelToken;

use super::outcome::{FinalState, Outcome, Report};
use super::registry::DestinationRegistry;
use super::request::RenameRequest;
use super::transaction::{State, Transaction};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Overwrite existing targets.
    pub force: bool,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

/// Position of an argument in the report.
#[derive(Debug)]
enum Slot {
    Transaction,
    Duplicate(String),
}

#[derive(Debug)]
pub struct Coordinator {
    slots: Vec<Slot>,
    transactions: Vec<Transaction>,
    registry: DestinationRegistry,
    options: RunOptions,
    cancel: CancelToken,
    namer: TempNamer,
    interrupted: bool,
    swept: bool,
}

impl Coordinator {
    /// Build one transaction per distinct source path, in request order.
    /// A later request for an already-seen source is reported as skipped.
    ///
    /// Outside dry-run mode the token is armed here, so an interrupt from now on
    /// leads to the abort sweep instead of an immediate exit.
    pub fn new(
        requests: Vec<RenameRequest>,
        options: RunOptions,
        cancel: CancelToken,
        namer: TempNamer,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut slots = Vec::with_capacity(requests.len());
        let mut transactions = Vec::with_capacity(requests.len());
        for request in requests {
            if seen.insert(request.source_path().to_path_buf()) {
                slots.push(Slot::Transaction);
                transactions.push(Transaction::new(request));
            } else {
                debug!(arg = %request.argument(), "duplicate source; skipping");
                slots.push(Slot::Duplicate(request.argument().to_string()));
            }
        }
        if !options.dry_run {
            cancel.arm();
        }
        Self {
            slots,
            transactions,
            registry: DestinationRegistry::new(),
            options,
            cancel,
            namer,
            interrupted: false,
            swept: false,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn registry(&self) -> &DestinationRegistry {
        &self.registry
    }

    /// Run the whole batch and report.
    pub fn run(mut self) -> Report {
        if self.options.dry_run {
            return self.preview();
        }
        self.stage_all();
        self.commit_all();
        self.finish()
    }

    /// Phase 1.
    pub fn stage_all(&mut self) {
        for idx in 0..self.transactions.len() {
            if self.check_cancelled() {
                break;
            }
            self.transactions[idx].stage(&mut self.namer);
        }
    }

    /// Phase 2.
    pub fn commit_all(&mut self) {
        for idx in 0..self.transactions.len() {
            if self.check_cancelled() {
                break;
            }
            if self.transactions[idx].state() == State::Staged {
                self.commit(idx);
            }
        }
    }

    /// Roll back every transaction still staged. Idempotent.
    pub fn abort(&mut self) {
        if self.swept {
            return;
        }
        self.swept = true;
        for idx in 0..self.transactions.len() {
            if self.transactions[idx].state() != State::Staged {
                continue;
            }
            if self.transactions[idx].error().is_none() {
                self.transactions[idx].record_error(RenameError::Interrupted);
            }
            self.rollback(idx);
        }
    }

    /// Run the abort sweep and turn every argument into an outcome, in order.
    pub fn finish(mut self) -> Report {
        self.abort();
        let interrupted = self.interrupted || self.cancel.is_cancelled();
        let mut transactions = mem::take(&mut self.transactions).into_iter();
        let outcomes = mem::take(&mut self.slots)
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Transaction => transactions.next().map(|tx| tx.into_outcome(interrupted)),
                Slot::Duplicate(argument) => Some(Outcome::settled(
                    argument,
                    FinalState::Skipped,
                    Some(RenameError::Duplicate),
                )),
            })
            .collect();
        Report {
            outcomes,
            interrupted,
        }
    }

    fn check_cancelled(&mut self) -> bool {
        if self.cancel.is_cancelled() && !self.interrupted {
            warn!("interrupted; stopping batch");
            self.interrupted = true;
        }
        self.interrupted
    }

    fn commit(&mut self, idx: usize) {
        let tx = &self.transactions[idx];
        let Some(temp) = tx.temp_path().map(Path::to_path_buf) else {
            return;
        };
        let target = tx.request().target_path().to_path_buf();

        if !self.options.force && lexists(&target) {
            warn!(arg = %tx.request().argument(), target = %target.display(), "target exists; rolling back");
            self.transactions[idx].record_error(RenameError::TargetExists(target));
            self.rollback(idx);
            return;
        }

        match try_atomic_move("commit", &temp, &target) {
            Ok(()) => {
                info!(source = %self.transactions[idx].request().source_path().display(), target = %target.display(), "renamed");
                self.transactions[idx].mark_committed();
                self.registry.claim(&target, idx);
            }
            Err(e) => {
                warn!(target = %target.display(), kind = e.kind(), error = %e, "commit failed; rolling back");
                self.transactions[idx].record_error(e);
                self.rollback(idx);
            }
        }
    }

    /// Staged -> RolledBack, or Lost when the original path cannot be recovered.
    fn rollback(&mut self, idx: usize) {
        let tx = &self.transactions[idx];
        let Some(temp) = tx.temp_path().map(Path::to_path_buf) else {
            return;
        };
        let original = tx.request().source_path().to_path_buf();

        if !lexists(&temp) {
            self.lose(idx, RenameError::TempVanished(temp));
            return;
        }

        if lexists(&original) {
            match self.registry.occupant(&original) {
                Some(occ) if occ != idx && self.transactions[occ].state() == State::Committed => {
                    if let Err(e) = self.undo_commit(occ, idx) {
                        self.lose(idx, e);
                        return;
                    }
                }
                // Untracked files are never moved out of the way.
                _ => {
                    self.lose(idx, RenameError::OriginalOccupied(original));
                    return;
                }
            }
        }

        match try_atomic_move("revert", &temp, &original) {
            Ok(()) => {
                info!(source = %original.display(), "rolled back");
                self.transactions[idx].mark_rolled_back();
            }
            Err(e) => self.lose(idx, e),
        }
    }

    /// Committed -> RolledBack so that `requester` can have its original path back.
    /// Does not recurse: an occupied original path fails the undo.
    fn undo_commit(&mut self, occ: usize, requester: usize) -> Result<(), RenameError> {
        let request = self.transactions[occ].request();
        let target = request.target_path().to_path_buf();
        let original = request.source_path().to_path_buf();

        if lexists(&original) {
            return Err(RenameError::OriginalOccupied(original));
        }
        try_atomic_move("undo", &target, &original)?;

        self.registry.release(&target, occ);
        let displaced_by = self.transactions[requester].request().argument().to_string();
        info!(target = %target.display(), source = %original.display(), "undid rename to make room");
        let tx = &mut self.transactions[occ];
        tx.mark_rolled_back();
        tx.record_error(RenameError::Displaced(displaced_by));
        Ok(())
    }

    fn lose(&mut self, idx: usize, reason: RenameError) {
        let tx = &mut self.transactions[idx];
        error!(
            arg = %tx.request().argument(),
            temp = %tx.temp_path().map(|p| p.display().to_string()).unwrap_or_default(),
            kind = reason.kind(),
            error = %reason,
            "could not revert"
        );
        tx.mark_lost(reason);
    }

    /// Dry run: nothing is staged; report what would be renamed.
    fn preview(mut self) -> Report {
        let mut transactions = mem::take(&mut self.transactions).into_iter();
        let outcomes = mem::take(&mut self.slots)
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Transaction => transactions.next().map(preview_one),
                Slot::Duplicate(argument) => Some(Outcome::settled(
                    argument,
                    FinalState::Skipped,
                    Some(RenameError::Duplicate),
                )),
            })
            .collect();
        Report {
            outcomes,
            interrupted: false,
        }
    }
}

fn preview_one(tx: Transaction) -> Outcome {
    let request = tx.request();
    let source = request.source_path();
    let (state, error) = match fs::symlink_metadata(source) {
        Err(e) => (FinalState::Rejected, Some(io_error_with_help("stat", source)(e))),
        Ok(_) if request.is_noop() => (FinalState::Unchanged, None),
        Ok(_) => {
            info!(source = %source.display(), target = %request.target_path().display(), "dry-run: would rename");
            (FinalState::WouldRename, None)
        }
    };
    Outcome {
        argument: request.argument().to_string(),
        state,
        target_name: Some(request.target_name().to_string()),
        error,
        revert_error: None,
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.abort();
        self.cancel.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn request(dir: &Path, from: &str, to: &str) -> RenameRequest {
        RenameRequest::new(from, dir.join(from), to)
    }

    fn coordinator(requests: Vec<RenameRequest>, options: RunOptions) -> Coordinator {
        Coordinator::new(requests, options, CancelToken::new(), TempNamer::with_seed(7))
    }

    #[test]
    fn arms_token_outside_dry_run() {
        let token = CancelToken::new();
        let c = Coordinator::new(vec![], RunOptions::default(), token.clone(), TempNamer::with_seed(1));
        assert!(token.is_armed());
        drop(c);
        assert!(!token.is_armed());

        let dry = RunOptions { dry_run: true, ..Default::default() };
        let _c = Coordinator::new(vec![], dry, token.clone(), TempNamer::with_seed(1));
        assert!(!token.is_armed());
    }

    #[test]
    fn drop_reverts_staged_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), "A").unwrap();
        fs::write(dir.path().join("b"), "B").unwrap();

        let mut c = coordinator(
            vec![request(dir.path(), "a", "x"), request(dir.path(), "b", "y")],
            RunOptions::default(),
        );
        c.stage_all();
        assert!(c.transactions().iter().all(|t| t.state() == State::Staged));
        assert!(!dir.path().join("a").exists());
        drop(c);

        assert_eq!(fs::read_to_string(dir.path().join("a")).unwrap(), "A");
        assert_eq!(fs::read_to_string(dir.path().join("b")).unwrap(), "B");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn cancellation_between_phases_rolls_back() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), "A").unwrap();
        let token = CancelToken::new();
        let mut c = Coordinator::new(
            vec![request(dir.path(), "a", "b")],
            RunOptions::default(),
            token.clone(),
            TempNamer::with_seed(3),
        );
        c.stage_all();
        token.cancel();
        c.commit_all();
        let report = c.finish();

        assert!(report.interrupted);
        assert_eq!(report.outcomes[0].state, FinalState::RolledBack);
        assert!(matches!(report.outcomes[0].error, Some(RenameError::Interrupted)));
        assert!(dir.path().join("a").exists());
        assert!(!dir.path().join("b").exists());
    }

    #[test]
    fn abort_runs_once() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), "A").unwrap();
        let mut c = coordinator(vec![request(dir.path(), "a", "b")], RunOptions::default());
        c.stage_all();
        c.abort();
        assert_eq!(c.transactions()[0].state(), State::RolledBack);
        c.abort();
        assert_eq!(c.transactions()[0].state(), State::RolledBack);
    }

    #[test]
    fn commit_claims_destination() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), "A").unwrap();
        let mut c = coordinator(vec![request(dir.path(), "a", "b")], RunOptions::default());
        c.stage_all();
        c.commit_all();
        assert_eq!(c.registry().occupant(&dir.path().join("b")), Some(0));
        assert_eq!(c.transactions()[0].state(), State::Committed);
    }

    #[test]
    fn duplicates_keep_first_and_report_position() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), "A").unwrap();
        let report = coordinator(
            vec![request(dir.path(), "a", "b"), request(dir.path(), "a", "c")],
            RunOptions::default(),
        )
        .run();

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].state, FinalState::Renamed);
        assert_eq!(report.outcomes[1].state, FinalState::Skipped);
        assert!(dir.path().join("b").exists());
        assert!(!dir.path().join("c").exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), "A").unwrap();
        let dry = RunOptions { dry_run: true, ..Default::default() };
        let report = coordinator(
            vec![
                request(dir.path(), "a", "b"),
                request(dir.path(), "missing", "c"),
            ],
            dry,
        )
        .run();

        assert_eq!(report.outcomes[0].state, FinalState::WouldRename);
        assert_eq!(report.outcomes[1].state, FinalState::Rejected);
        assert!(dir.path().join("a").exists());
        assert!(!dir.path().join("b").exists());
    }
}
