//! Config validation logic.
//! Everything here runs before any file is touched, so a bad option never
//! leaves a batch half done.

use anyhow::{Context, Result, bail};
use tracing::{debug, error, info};

use crate::transform::Pipeline;

use super::paths::path_has_symlink_ancestor;
use super::types::Config;

impl Config {
    /// Compile every expression, in order, into one pipeline.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let mut pipeline = Pipeline::default();
        for expr in &self.expressions {
            pipeline
                .extend(expr)
                .with_context(|| format!("invalid expression '{expr}'"))?;
        }
        Ok(pipeline)
    }

    /// Check options and expressions; returns the compiled pipeline.
    pub fn validate(&self) -> Result<Pipeline> {
        if self.naming.format.is_empty() {
            error!("empty format string");
            bail!("empty format string");
        }

        if let Some(log_file) = &self.log_file
            && path_has_symlink_ancestor(log_file)
                .with_context(|| format!("inspect log file path '{}'", log_file.display()))?
        {
            bail!(
                "refusing to log to '{}': an ancestor directory is a symlink",
                log_file.display()
            );
        }

        let pipeline = self.pipeline()?;
        debug!(operations = pipeline.len(), "expressions compiled");

        info!(
            format = %self.naming.format,
            force = self.force,
            dry_run = self.dry_run,
            stdin = self.stdin,
            "config validated"
        );
        Ok(pipeline)
    }
}
