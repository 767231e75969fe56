//! Application orchestrator.
//! Loads/merges config, initializes logging, validates options and expressions,
//! installs the signal handler, plans the batch and runs it.

use anyhow::{Context, Result};
use std::env;
use std::io;
use std::mem;
use tracing::{debug, info};

use batch_rename::cli::Args;
use batch_rename::config::{self, CONFIG_ENV, Config};
use batch_rename::naming::{plan, plan_from_input};
use batch_rename::output as out;
use batch_rename::rename::{self, ExitStatus, FinalState, print_report};
use batch_rename::shutdown::{self, CancelToken};

use crate::logging::init_tracing;

fn print_config_location() {
    if let Some(path) = config::env_config_path() {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}", path.display()));
        if !path.exists() {
            out::print_warn("That file does not exist; runs will fail until it does.");
        }
        return;
    }
    match config::config_file_location() {
        Some(p) => {
            out::print_info(&format!("Default batch_rename config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults apply.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}

/// Run the CLI application. Batch-fatal problems come back as errors; per-file
/// problems are reported on the way and folded into the exit status.
pub fn run(args: Args) -> Result<ExitStatus> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(ExitStatus::Success);
    }

    // Build config (may read XML). CLI args override config values.
    let mut cfg: Config = config::load_config()?.unwrap_or_default();
    args.apply_overrides(&mut cfg);

    // Hold the guard for the whole run so file logs are flushed on return.
    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    debug!("Starting batch_rename: {:?}", args);
    let pipeline = cfg.validate()?;

    if args.files.is_empty() {
        debug!("no files given");
        return Ok(ExitStatus::Success);
    }

    let cancel = CancelToken::new();
    shutdown::install_handler(cancel.clone())?;

    let cwd = env::current_dir().context("determine working directory")?;
    let mut batch = if cfg.stdin {
        let mut input = io::stdin().lock();
        plan_from_input(&args.files, &mut input, &cwd)
    } else {
        plan(&args.files, &pipeline, &cfg.naming, &cwd)
    };
    debug!(arguments = batch.len(), requests = batch.requests.len(), "batch planned");

    let requests = mem::take(&mut batch.requests);
    let report = batch.complete(rename::run(requests, cfg.run_options(), cancel));

    print_report(&report, cfg.verbose);
    let status = report.exit_status();
    info!(
        status = status.code(),
        renamed = report
            .outcomes
            .iter()
            .filter(|o| o.state == FinalState::Renamed)
            .count(),
        lost = report.lost().count(),
        interrupted = report.interrupted,
        "batch finished"
    );
    Ok(status)
}
