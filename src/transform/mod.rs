//! Name transformation language.
//! Compiles sed/Perl-style `s///` and `y///` (or `tr///`) expressions into a `Pipeline`
//! that is applied, in order, to each file name.
//!
//! Notes:
//! - Compilation is the only fallible step; `Pipeline::apply` is total.
//! - Several expressions may be given in one string, separated by `;` or whitespace.

mod escape;
mod ordinal;
mod parse;
mod substitute;
mod transliterate;

pub use ordinal::{complement, expand_ranges};
pub use substitute::Substitution;
pub use transliterate::Transliteration;

use std::str::FromStr;
use thiserror::Error;

/// Failure to compile a transformation expression.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized operation: {0}")]
    UnrecognizedOperation(String),

    #[error("unterminated expression: {0}")]
    Unterminated(String),

    #[error("invalid delimiter: {0}")]
    InvalidDelimiter(String),

    #[error("invalid {kind} flag: {flag}")]
    InvalidFlag { kind: &'static str, flag: char },

    #[error("invalid range in transliteration operator: {0}")]
    InvalidRange(String),

    #[error("bad escape sequence: {0}")]
    BadEscape(String),

    #[error("invalid group reference: {0}")]
    InvalidGroupReference(String),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// One compiled step of a pipeline.
#[derive(Debug, Clone)]
pub enum Operation {
    Substitute(Substitution),
    Transliterate(Transliteration),
}

impl Operation {
    pub fn apply(&self, input: &str) -> String {
        match self {
            Operation::Substitute(s) => s.apply(input),
            Operation::Transliterate(t) => t.apply(input),
        }
    }
}

/// Ordered list of operations applied as a left-to-right fold.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    ops: Vec<Operation>,
}

impl Pipeline {
    /// Compile a pipeline from expression text.
    pub fn compile(text: &str) -> Result<Self, ParseError> {
        let mut pipeline = Self::default();
        pipeline.extend(text)?;
        Ok(pipeline)
    }

    /// Append the operations found in `text`. On error the pipeline is left unchanged.
    pub fn extend(&mut self, text: &str) -> Result<(), ParseError> {
        let ops = parse::parse_operations(text)?;
        self.ops.extend(ops);
        Ok(())
    }

    /// Run every operation over `name`, in order.
    pub fn apply(&self, name: &str) -> String {
        self.ops
            .iter()
            .fold(name.to_string(), |acc, op| op.apply(&acc))
    }

    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl FromStr for Pipeline {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}
