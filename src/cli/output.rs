//! CLI output formatting.
//!
//! Formatting is split from printing so the text can be tested directly.

use std::fmt::Write as _;

use crate::engine::registry::{self, AlgorithmDescriptor};
use crate::engine::{Step, Trace};
use crate::replay::TraceFile;

/// Print version information.
pub fn print_version() {
    println!("{}", format_version());
}

/// Version line with embedded build metadata.
#[must_use]
pub fn format_version() -> String {
    let version = option_env!("SORTVIZ_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    let mut out = format!("sortviz {version}");
    if let Some(hash) = option_env!("GIT_HASH").filter(|h| !h.is_empty()) {
        let short = hash.get(..12).unwrap_or(hash);
        let _ = write!(out, " ({short})");
    }
    if let Some(ts) = option_env!("BUILD_TIMESTAMP") {
        let _ = write!(out, " built {ts}");
    }
    out
}

/// Print help message.
pub fn print_help() {
    println!(
        r"sortviz - Step-recording sorting engine and playback driver

USAGE:
    sortviz [-v|-vv|-q] [--config <file.yaml>] <COMMAND> [OPTIONS]

COMMANDS:
    list                        List available algorithms

    info <algorithm>            Show complexity and how an algorithm works

    trace <algorithm>           Record a trace and print it
        -n, --size <N>          Generated array size (default: from config)
        --seed <N>              Generator seed (default: from config or 42)
        --values <a,b,c>        Sort these values instead of a generated array
        -f, --format <FMT>      text | json (default: text)
        -o, --output <FILE>     Write to a file instead of stdout

    verify                      Check every algorithm against its postconditions
        -n, --size <N>          Array size (default: from config)
        --seed <N>              Base seed (default: from config or 42)
        --runs <N>              Arrays per algorithm (default: 3)

    replay <trace.json>         Replay a saved trace and check it

    help                        Show this help message
    version                     Show version information

ALGORITHMS:
    bubble, selection, insertion, quick, merge, heap
    (also accepted: bubble-sort, bubble_sort, bubbleSort, ...)

EXAMPLES:
    sortviz trace bubble --values 5,3,8,1
    sortviz trace quick --size 20 --seed 7 --format json -o quick.json
    sortviz replay quick.json
    sortviz verify --runs 10
"
    );
}

/// Print the algorithm table.
pub fn print_algorithm_list() {
    print!("{}", format_algorithm_list());
}

/// One row per registered algorithm.
#[must_use]
pub fn format_algorithm_list() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<16} {:<12} {:<8} {:<8}",
        "KEY", "NAME", "AVERAGE", "STABLE", "IN-PLACE"
    );
    for desc in registry::all() {
        let _ = writeln!(
            out,
            "{:<10} {:<16} {:<12} {:<8} {:<8}",
            desc.id.to_string(),
            desc.name,
            desc.time_complexity.average,
            yes_no(desc.stable),
            yes_no(desc.in_place)
        );
    }
    out
}

/// Print one algorithm's metadata.
pub fn print_algorithm_info(desc: &AlgorithmDescriptor) {
    print!("{}", format_algorithm_info(desc));
}

/// Full metadata block for one algorithm.
#[must_use]
pub fn format_algorithm_info(desc: &AlgorithmDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", desc.name, desc.id);
    let _ = writeln!(out, "{}", desc.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Time complexity:");
    let _ = writeln!(out, "  Best:    {}", desc.time_complexity.best);
    let _ = writeln!(out, "  Average: {}", desc.time_complexity.average);
    let _ = writeln!(out, "  Worst:   {}", desc.time_complexity.worst);
    let _ = writeln!(out, "Space complexity: {}", desc.space_complexity);
    let _ = writeln!(out, "Stable:   {}", yes_no(desc.stable));
    let _ = writeln!(out, "In-place: {}", yes_no(desc.in_place));
    let _ = writeln!(out);
    let _ = writeln!(out, "How it works:");
    for (i, line) in desc.how_it_works.iter().enumerate() {
        let _ = writeln!(out, "  {}. {line}", i + 1);
    }
    out
}

/// One step as a single line.
#[must_use]
pub fn format_step(index: usize, step: &Step) -> String {
    match step {
        Step::Compare { indices } => format!("{index:>6}  compare {indices:?}"),
        Step::Swap { indices, array } => format!("{index:>6}  swap    {indices:?} -> {array:?}"),
        Step::Sorted { indices } => format!("{index:>6}  sorted  {indices:?}"),
    }
}

/// Whole trace as text: header, one line per step, summary.
#[must_use]
pub fn format_trace_text(algorithm: &str, trace: &Trace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {algorithm}");
    let _ = writeln!(out, "# input: {:?}", trace.input());
    for (i, step) in trace.steps().iter().enumerate() {
        let _ = writeln!(out, "{}", format_step(i, step));
    }
    let _ = writeln!(out, "{}", format_summary(trace));
    out
}

/// Step counts and final array.
#[must_use]
pub fn format_summary(trace: &Trace) -> String {
    let counts = trace.counts();
    format!(
        "# {} steps: {} compares, {} swaps, {} sorted; final: {:?}",
        trace.len(),
        counts.compares,
        counts.swaps,
        counts.sorted,
        trace.final_values()
    )
}

/// Print a replayed trace file report.
pub fn print_replay_report(file: &TraceFile, violations: &[String]) {
    println!("Trace file: {} (schema {})", file.algorithm, file.schema_version);
    if let Some(seed) = file.seed {
        println!("Seed: {seed}");
    }
    println!("Input: {} values", file.trace.array_len());
    println!("{}", format_summary(&file.trace));
    if violations.is_empty() {
        println!("✓ Trace satisfies all postconditions");
    } else {
        println!("✗ {} violation(s):", violations.len());
        for v in violations {
            println!("    {v}");
        }
    }
}

/// Outcome of one `verify` check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Algorithm key.
    pub algorithm: String,
    /// What was checked.
    pub case: String,
    /// Failure description, if any.
    pub failure: Option<String>,
}

/// Print `verify` results; returns the number of failures.
pub fn print_verify_report(outcomes: &[VerifyOutcome]) -> usize {
    let mut failures = 0;
    for outcome in outcomes {
        match &outcome.failure {
            None => println!("  ✓ {:<10} {}", outcome.algorithm, outcome.case),
            Some(reason) => {
                failures += 1;
                println!("  ✗ {:<10} {}: {reason}", outcome.algorithm, outcome.case);
            }
        }
    }
    println!();
    println!(
        "{} checks, {} passed, {failures} failed",
        outcomes.len(),
        outcomes.len() - failures
    );
    failures
}

const fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
