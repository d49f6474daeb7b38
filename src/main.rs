//! sortviz CLI - step-recording sorting engine
//!
//! Command-line interface for listing, tracing, verifying and replaying
//! sorting algorithm traces.

use std::process::ExitCode;

use sortviz::cli::{run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .format_target(false)
        .filter_level(args.log_level())
        .init();

    run_cli(args)
}
