use clap::Parser;
use std::process::ExitCode;

use batch_rename::cli::Args;
use batch_rename::output as out;
use batch_rename::rename::ExitStatus;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = Args::parse();
    match app::run(args) {
        Ok(status) => status.into(),
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            ExitStatus::Usage.into()
        }
    }
}
