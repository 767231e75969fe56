//! Destination registry: which transaction currently holds a committed path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maps a committed target path to the index of the transaction that occupies it.
/// Written only by the coordinator, and only after a successful commit or undo.
#[derive(Debug, Default)]
pub struct DestinationRegistry {
    occupants: HashMap<PathBuf, usize>,
}

impl DestinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tx` as the occupant of `path`, replacing any previous holder.
    pub fn claim(&mut self, path: &Path, tx: usize) {
        self.occupants.insert(path.to_path_buf(), tx);
    }

    pub fn occupant(&self, path: &Path) -> Option<usize> {
        self.occupants.get(path).copied()
    }

    /// Forget `path` if `tx` still holds it.
    pub fn release(&mut self, path: &Path, tx: usize) {
        if self.occupant(path) == Some(tx) {
            self.occupants.remove(path);
        }
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}
