//! Turning file arguments into rename requests.
//!
//! Two modes:
//! - format mode renders each new name from the format string, the pipeline and
//!   the counter;
//! - input mode takes each destination verbatim from one line of input.
//!
//! Arguments that cannot become a request are settled here with an outcome of their
//! own, keeping their position among the others.

mod format;
mod numbering;
mod paths;
mod stdin;

pub use format::Format;
pub use numbering::Counter;
pub use paths::{absolutize, is_blank, split_extension};
pub use stdin::next_destination;

use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::RenameError;
use crate::rename::{FinalState, Outcome, RenameRequest, Report};
use crate::transform::Pipeline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingOptions {
    pub format: String,
    /// Transform the whole name instead of the stem only.
    pub whole_name: bool,
    pub lower_extension: bool,
    pub initial: i64,
    pub increment: i64,
    pub zero_pad: bool,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            format: "{}".to_string(),
            whole_name: false,
            lower_extension: false,
            initial: 1,
            increment: 1,
            zero_pad: false,
        }
    }
}

/// Requests for the coordinator plus outcomes already decided.
#[derive(Debug, Default)]
pub struct Batch {
    pub requests: Vec<RenameRequest>,
    /// (position among all arguments, outcome)
    pub settled: Vec<(usize, Outcome)>,
}

impl Batch {
    fn position(&self) -> usize {
        self.requests.len() + self.settled.len()
    }

    fn push(&mut self, request: RenameRequest) {
        debug!(arg = %request.argument(), target = %request.target_name(), "planned");
        self.requests.push(request);
    }

    fn settle(&mut self, argument: String, state: FinalState, error: RenameError) {
        debug!(arg = %argument, kind = error.kind(), "not planned");
        let position = self.position();
        self.settled
            .push((position, Outcome::settled(argument, state, Some(error))));
    }

    /// Number of arguments seen.
    pub fn len(&self) -> usize {
        self.position()
    }

    pub fn is_empty(&self) -> bool {
        self.position() == 0
    }

    /// Merge the coordinator's report with the outcomes settled here.
    pub fn complete(self, mut report: Report) -> Report {
        report.merge_settled(self.settled);
        report
    }
}

fn display_arg(arg: &Path) -> String {
    arg.to_string_lossy().into_owned()
}

/// Format mode.
pub fn plan(args: &[PathBuf], pipeline: &Pipeline, options: &NamingOptions, cwd: &Path) -> Batch {
    let format = Format::parse(&options.format);
    let numbered = args.iter().filter(|a| !is_blank(a)).count();
    let mut counter = Counter::new(options.initial, options.increment, numbered, options.zero_pad);
    let mut seen = HashSet::new();
    let mut batch = Batch::default();

    for arg in args {
        let display = display_arg(arg);
        if is_blank(arg) {
            batch.settle(display, FinalState::Rejected, RenameError::InvalidArgument);
            continue;
        }
        let source = absolutize(arg, cwd);
        if !seen.insert(source.clone()) {
            batch.settle(display, FinalState::Skipped, RenameError::Duplicate);
            continue;
        }
        // Every distinct argument owns a number, even one rejected below.
        let number = if format.uses_number() {
            counter.take()
        } else {
            String::new()
        };
        let name = match source.file_name().map(|n| n.to_str()) {
            Some(Some(name)) => name,
            Some(None) => {
                batch.settle(display, FinalState::Rejected, RenameError::NonUtf8Name);
                continue;
            }
            None => {
                batch.settle(display, FinalState::Rejected, RenameError::InvalidArgument);
                continue;
            }
        };

        let (stem, ext) = if options.whole_name {
            (name, "")
        } else {
            split_extension(name)
        };
        let transformed = if format.uses_name() {
            pipeline.apply(stem)
        } else {
            String::new()
        };

        let mut new_name = format.render(&transformed, &number);
        if options.lower_extension {
            new_name.push_str(&ext.to_lowercase());
        } else {
            new_name.push_str(ext);
        }
        if new_name.is_empty() {
            batch.settle(display, FinalState::Rejected, RenameError::EmptyName);
            continue;
        }
        let request = RenameRequest::new(display, source, new_name);
        batch.push(request);
    }
    batch
}

/// Input mode: one line of `input` per non-blank argument.
pub fn plan_from_input<R: BufRead>(args: &[PathBuf], input: &mut R, cwd: &Path) -> Batch {
    let mut batch = Batch::default();
    for arg in args {
        let display = display_arg(arg);
        if is_blank(arg) {
            batch.settle(display, FinalState::Rejected, RenameError::InvalidArgument);
            continue;
        }
        let source = absolutize(arg, cwd);
        match next_destination(input, cwd) {
            Ok(Some(dest)) => batch.push(RenameRequest::with_target_path(display, source, dest)),
            Ok(None) => batch.settle(display, FinalState::Skipped, RenameError::EmptyLine),
            Err(e) => batch.settle(display, FinalState::Rejected, e),
        }
    }
    batch
}
