//! CLI command handlers.
//!
//! Each handler returns an exit code; errors are reported on stderr.

use log::{debug, info};
use std::path::Path;
use std::process::ExitCode;

use crate::config::VisualizerConfig;
use crate::engine::guard::TraceGuard;
use crate::engine::registry::{descriptor, AlgorithmId};
use crate::engine::rng::ArrayGenerator;
use crate::engine::{Trace, Value};
use crate::error::SortResult;
use crate::replay::{TraceFile, TraceScrubber};

use super::args::OutputFormat;
use super::output::{
    format_trace_text, print_algorithm_info, print_algorithm_list, print_help,
    print_replay_report, print_verify_report, print_version, VerifyOutcome,
};
use super::{Args, Command};

/// Seed used when neither the command line nor the config names one.
pub const DEFAULT_SEED: u64 = 42;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let config = match load_config(args.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    match args.command {
        Command::List => {
            print_algorithm_list();
            ExitCode::SUCCESS
        }
        Command::Info { algorithm } => show_info(&algorithm),
        Command::Trace {
            algorithm,
            size,
            seed,
            values,
            format,
            output,
        } => {
            let request = TraceRequest {
                algorithm: &algorithm,
                size,
                seed,
                values,
                format,
                output: output.as_deref(),
            };
            run_trace(&config, &request)
        }
        Command::Verify { size, seed, runs } => {
            let size = size.unwrap_or(config.array.size);
            let seed = seed.or(config.seed).unwrap_or(DEFAULT_SEED);
            verify_all(&config, size, seed, runs)
        }
        Command::Replay { path } => replay_file(&path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Load the configuration file, or defaults when none is given.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> SortResult<VisualizerConfig> {
    match path {
        Some(path) => {
            info!("loading config from {}", path.display());
            VisualizerConfig::load(path)
        }
        None => Ok(VisualizerConfig::default()),
    }
}

/// Show one algorithm's metadata.
#[must_use]
pub fn show_info(name: &str) -> ExitCode {
    match name.parse::<AlgorithmId>() {
        Ok(id) => {
            print_algorithm_info(descriptor(id));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Parameters of the `trace` command.
#[derive(Debug, Clone)]
pub struct TraceRequest<'a> {
    /// Algorithm name as typed.
    pub algorithm: &'a str,
    /// Generated array size override.
    pub size: Option<usize>,
    /// Generator seed override.
    pub seed: Option<u64>,
    /// Explicit input values.
    pub values: Option<Vec<Value>>,
    /// Output format.
    pub format: OutputFormat,
    /// Output file.
    pub output: Option<&'a Path>,
}

/// Record a trace and print or save it.
#[must_use]
pub fn run_trace(config: &VisualizerConfig, request: &TraceRequest<'_>) -> ExitCode {
    match render_trace(config, request) {
        Ok(rendered) => {
            if let Some(path) = request.output {
                if let Err(e) = std::fs::write(path, rendered) {
                    eprintln!("Error: cannot write {}: {e}", path.display());
                    return ExitCode::from(1);
                }
                println!("Trace written to {}", path.display());
            } else {
                print!("{rendered}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Record a trace and render it in the requested format.
///
/// # Errors
///
/// Returns error if the algorithm is unknown, the trace fails the guard or
/// JSON encoding fails.
pub fn render_trace(config: &VisualizerConfig, request: &TraceRequest<'_>) -> SortResult<String> {
    let id: AlgorithmId = request.algorithm.parse()?;
    let seed = request.seed.or(config.seed).unwrap_or(DEFAULT_SEED);

    let (values, seed) = match &request.values {
        Some(values) => (values.clone(), None),
        None => {
            let size = request.size.unwrap_or(config.array.size);
            let mut generator =
                ArrayGenerator::with_range(seed, config.array.min_value..=config.array.max_value);
            (generator.generate(size), Some(seed))
        }
    };

    debug!("tracing {id} over {} values", values.len());
    let trace = descriptor(id).run(&values);
    TraceGuard::new().check(&trace)?;

    match request.format {
        OutputFormat::Text => Ok(format_trace_text(descriptor(id).name, &trace)),
        OutputFormat::Json => TraceFile::new(id, seed, trace).to_json(),
    }
}

/// Run every algorithm over edge-case and generated arrays and check the
/// traces.
#[must_use]
pub fn verify_all(config: &VisualizerConfig, size: usize, seed: u64, runs: usize) -> ExitCode {
    println!(
        "Verifying {} algorithms ({runs} generated arrays of {size} values, base seed {seed})\n",
        AlgorithmId::ALL.len()
    );
    let outcomes = collect_verify_outcomes(config, size, seed, runs);
    if print_verify_report(&outcomes) == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Build the full list of `verify` checks.
///
/// Generated arrays draw from the configured value range.
#[must_use]
pub fn collect_verify_outcomes(
    config: &VisualizerConfig,
    size: usize,
    seed: u64,
    runs: usize,
) -> Vec<VerifyOutcome> {
    let mut cases: Vec<(String, Vec<Value>)> = vec![
        ("empty".to_string(), Vec::new()),
        ("singleton".to_string(), vec![7]),
        ("all equal".to_string(), vec![2; 8]),
        ("ascending".to_string(), (1..=16).collect()),
        ("descending".to_string(), (1..=16).rev().collect()),
    ];
    let mut permutation: Vec<Value> = (1..=16).collect();
    ArrayGenerator::new(seed).shuffle(&mut permutation);
    cases.push(("distinct shuffled".to_string(), permutation));

    for r in 0..runs {
        let run_seed = seed.wrapping_add(r as u64);
        let values =
            ArrayGenerator::with_range(run_seed, config.array.min_value..=config.array.max_value)
                .generate(size);
        cases.push((format!("seed {run_seed}"), values));
    }

    let guard = TraceGuard::new();
    let mut outcomes = Vec::new();
    for id in AlgorithmId::ALL {
        let desc = descriptor(id);
        for (case, values) in &cases {
            let first = desc.run(values);
            let failure = guard.check(&first).err().map(|e| e.to_string()).or_else(|| {
                (desc.run(values) != first).then(|| "trace is not deterministic".to_string())
            });
            outcomes.push(VerifyOutcome {
                algorithm: id.to_string(),
                case: case.clone(),
                failure,
            });
        }
    }
    outcomes
}

/// Load a trace file, replay it to the end and check it.
#[must_use]
pub fn replay_file(path: &Path) -> ExitCode {
    let file = match TraceFile::load(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: cannot load {}: {e}", path.display());
            return ExitCode::from(1);
        }
    };

    let violations: Vec<String> = TraceGuard::new()
        .inspect(&file.trace)
        .iter()
        .map(ToString::to_string)
        .collect();

    if let Err(e) = replay_to_end(&file.trace) {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    print_replay_report(&file, &violations);
    if violations.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Replay every step through a scrubber and return the final array.
///
/// # Errors
///
/// Returns error if the scrubber cannot reach the end of the trace.
pub fn replay_to_end(trace: &Trace) -> SortResult<Vec<Value>> {
    let mut scrubber = TraceScrubber::new(trace.clone(), 64);
    let state = scrubber.seek_to(trace.len())?;
    Ok(state.values)
}
