//! CLI definition and parsing.
//! Defines Args and applies them on top of the loaded Config.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - --number switches the default format from `{}` to `{N}`; an explicit --format wins.

use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Rename files with sed-like expressions, format strings and numbering.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Rename many files at once, safely (staged renames with rollback)"
)]
pub struct Args {
    /// Files to rename.
    #[arg(value_name = "FILE", value_hint = ValueHint::AnyPath)]
    pub files: Vec<PathBuf>,

    /// Overwrite existing files.
    #[arg(short, long)]
    pub force: bool,

    /// Print each rename as `FILE: NEW_NAME`.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show what would be renamed without renaming anything.
    #[arg(short = 'n', long = "no-act", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// Read new names from standard input, one line per file; a blank line skips the file.
    #[arg(short = 'r', long)]
    pub stdin: bool,

    /// Transform the whole name, not just the part before the extension.
    #[arg(short, long)]
    pub whole_name: bool,

    /// Convert extensions to lower case.
    #[arg(short, long)]
    pub lower_extension: bool,

    /// Format for new names: `{}` is the transformed name, `{N}` the number.
    #[arg(short = 's', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Transformation, e.g. `s/IMG_/trip-/` or `y/A-Z/a-z/`; repeatable, `;`-separated.
    #[arg(short = 'e', long = "expression", value_name = "EXPR", action = ArgAction::Append)]
    pub expressions: Vec<String>,

    /// First number for `{N}`.
    #[arg(short = 'i', long, value_name = "N", allow_negative_numbers = true)]
    pub initial: Option<i64>,

    /// Step between numbers; may be negative.
    #[arg(short = 'j', long, value_name = "N", allow_negative_numbers = true)]
    pub increment: Option<i64>,

    /// Pad numbers with leading zeros to a common width.
    #[arg(short = 'z', long)]
    pub zero_pad: bool,

    /// Number files: the default format becomes `{N}`.
    #[arg(long)]
    pub number: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: off, quiet, normal, info, debug.
    #[arg(long, help = "Set log level: off, quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where batch_rename looks for its config file, then exit.
    #[arg(long, help = "Print the config file location used by batch_rename and exit")]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if self.force {
            cfg.force = true;
        }
        if self.verbose {
            cfg.verbose = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.stdin {
            cfg.stdin = true;
        }
        if self.whole_name {
            cfg.naming.whole_name = true;
        }
        if self.lower_extension {
            cfg.naming.lower_extension = true;
        }
        if self.zero_pad {
            cfg.naming.zero_pad = true;
        }
        if let Some(format) = &self.format {
            cfg.naming.format = format.clone();
        } else if self.number {
            cfg.naming.format = "{N}".to_string();
        }
        if let Some(n) = self.initial {
            cfg.naming.initial = n;
        }
        if let Some(n) = self.increment {
            cfg.naming.increment = n;
        }
        cfg.expressions.extend(self.expressions.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_set_flags() {
        let args = Args::parse_from(["batch_rename", "-f", "-e", "s/a/b/", "x"]);
        let mut cfg = Config {
            verbose: true,
            ..Default::default()
        };
        args.apply_overrides(&mut cfg);
        assert!(cfg.force);
        assert!(cfg.verbose);
        assert_eq!(cfg.expressions, ["s/a/b/"]);
        assert_eq!(cfg.naming.format, "{}");
    }

    #[test]
    fn number_changes_default_format_only() {
        let args = Args::parse_from(["batch_rename", "--number", "x"]);
        let mut cfg = Config::default();
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.naming.format, "{N}");

        let args = Args::parse_from(["batch_rename", "--number", "-s", "p{N}{}", "x"]);
        let mut cfg = Config::default();
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.naming.format, "p{N}{}");
    }

    #[test]
    fn debug_wins_over_log_level() {
        let args = Args::parse_from(["batch_rename", "--log-level", "quiet", "--debug"]);
        assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));
    }
}
