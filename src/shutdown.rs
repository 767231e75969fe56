//! Cooperative cancellation for SIGINT/SIGTERM/SIGHUP.
//!
//! Notes:
//! - The token is an explicit value handed to the coordinator; there is no process global.
//! - Relaxed atomics are sufficient for one-way "stop" and "armed" flags.
//! - While the token is not armed nothing on disk needs reverting, so the signal
//!   handler may end the process on the spot (e.g. while blocked reading stdin).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};

use crate::output as out;
use crate::rename::ExitStatus;

#[derive(Debug, Default)]
struct Flags {
    cancelled: AtomicBool,
    armed: AtomicBool,
}

/// Shared cancellation flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Flags>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation (idempotent).
    #[inline]
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Relaxed)
    }

    /// Mark that a batch with pending cleanup is in flight.
    pub fn arm(&self) {
        self.inner.armed.store(true, Ordering::Relaxed);
    }

    pub fn disarm(&self) {
        self.inner.armed.store(false, Ordering::Relaxed);
    }

    pub fn is_armed(&self) -> bool {
        self.inner.armed.load(Ordering::Relaxed)
    }
}

/// Install the process signal handler feeding `token`.
pub fn install_handler(token: CancelToken) -> Result<()> {
    ctrlc::set_handler(move || {
        token.cancel();
        if token.is_armed() {
            out::print_warn("Received interrupt; reverting unfinished renames...");
        } else {
            out::print_error("aborted");
            std::process::exit(ExitStatus::Interrupted.code());
        }
    })
    .context("failed to install signal handler")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = CancelToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
    }

    #[test]
    fn arm_and_disarm() {
        let t = CancelToken::new();
        assert!(!t.is_armed());
        t.arm();
        assert!(t.clone().is_armed());
        t.disarm();
        assert!(!t.is_armed());
    }
}
