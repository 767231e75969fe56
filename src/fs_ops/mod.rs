//! Filesystem operations used by the rename coordinator.

mod atomic;
mod helpers;
mod temp;
mod util;

pub use atomic::try_atomic_move;
pub use helpers::io_error_with_help;
pub use temp::TempNamer;
pub use util::lexists;
