//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::naming::NamingOptions;
use crate::rename::RunOptions;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// No diagnostic logging (default); per-file messages are still printed
    #[default]
    Off,
    /// Only errors
    Quiet,
    /// Informational output
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Some(LogLevel::Off),
            "quiet" | "error" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Off => "off",
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one batch.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Diagnostic log verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Overwrite existing targets
    pub force: bool,
    /// List successful renames
    pub verbose: bool,
    /// If true, print actions but do not modify the filesystem
    pub dry_run: bool,
    /// Take destinations verbatim from standard input
    pub stdin: bool,
    /// Format string, numbering and extension handling
    pub naming: NamingOptions,
    /// Transformation expressions, compiled in order
    pub expressions: Vec<String>,
}

impl Config {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            force: self.force,
            dry_run: self.dry_run,
        }
    }
}
