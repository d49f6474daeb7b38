//! CLI module for sortviz.
//!
//! All CLI logic lives here so it can be tested without spawning the binary.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, OutputFormat};
pub use commands::{
    collect_verify_outcomes, load_config, render_trace, replay_file, replay_to_end, run_cli,
    run_trace, show_info, verify_all, TraceRequest, DEFAULT_SEED,
};
pub use output::{
    format_algorithm_info, format_algorithm_list, format_step, format_summary, format_trace_text,
    format_version, print_algorithm_info, print_algorithm_list, print_help, print_replay_report,
    print_verify_report, print_version, VerifyOutcome,
};
