//! CLI argument parsing.
//!
//! Arguments are parsed by hand from any iterator of strings so the parser
//! can be tested without a process environment.

use std::path::PathBuf;

use crate::engine::Value;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
    /// Optional configuration file (`--config <file>`).
    pub config_path: Option<PathBuf>,
    /// Number of `-v` flags given.
    pub verbose: u8,
    /// Silence everything but errors (`-q`).
    pub quiet: bool,
}

/// Output format for `trace`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per step.
    #[default]
    Text,
    /// Versioned trace file document.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List registered algorithms
    List,
    /// Show an algorithm's metadata
    Info {
        /// Algorithm name as typed.
        algorithm: String,
    },
    /// Record and print a trace
    Trace {
        /// Algorithm name as typed.
        algorithm: String,
        /// Array size for generated input.
        size: Option<usize>,
        /// Generator seed.
        seed: Option<u64>,
        /// Explicit input values; overrides generation.
        values: Option<Vec<Value>>,
        /// Output format.
        format: OutputFormat,
        /// Write to a file instead of stdout.
        output: Option<PathBuf>,
    },
    /// Check every algorithm's traces against the engine postconditions
    Verify {
        /// Array size for generated input; config size when absent.
        size: Option<usize>,
        /// Base seed; run `r` uses `seed + r`. Config seed or 42 when absent.
        seed: Option<u64>,
        /// Number of generated arrays per algorithm.
        runs: usize,
    },
    /// Replay a saved trace file
    Replay {
        /// Path to the trace JSON file.
        path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        let mut verbose = 0u8;
        let mut quiet = false;
        let mut config_path = None;
        let mut rest = Vec::with_capacity(args.len());

        // Global flags may appear anywhere after the program name.
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-v" | "--verbose" => verbose = verbose.saturating_add(1),
                "-vv" => verbose = verbose.saturating_add(2),
                "-q" | "--quiet" => quiet = true,
                "--config" => {
                    if let Some(path) = args.get(i + 1) {
                        config_path = Some(PathBuf::from(path));
                        i += 1;
                    }
                }
                other => rest.push(other.to_string()),
            }
            i += 1;
        }

        Self {
            command: Self::parse_command(&rest),
            config_path,
            verbose,
            quiet,
        }
    }

    fn parse_command(args: &[String]) -> Command {
        let Some(first) = args.first() else {
            return Command::Help;
        };

        match first.as_str() {
            "list" => Command::List,
            "info" => Self::parse_info_command(args),
            "trace" => Self::parse_trace_command(args),
            "verify" => Self::parse_verify_command(args),
            "replay" => Self::parse_replay_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        }
    }

    /// Parse the 'info' command arguments.
    fn parse_info_command(args: &[String]) -> Command {
        match args.get(1) {
            Some(algorithm) => Command::Info {
                algorithm: algorithm.clone(),
            },
            None => {
                eprintln!("Error: 'info' command requires an algorithm name");
                Command::Help
            }
        }
    }

    /// Parse the 'trace' command arguments.
    fn parse_trace_command(args: &[String]) -> Command {
        let Some(algorithm) = args.get(1) else {
            eprintln!("Error: 'trace' command requires an algorithm name");
            return Command::Help;
        };

        let mut size = None;
        let mut seed = None;
        let mut values = None;
        let mut format = OutputFormat::Text;
        let mut output = None;

        let mut i = 2;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("--size" | "-n", Some(v)) => {
                    let Some(n) = parse_number("--size", v) else {
                        return Command::Help;
                    };
                    size = Some(n);
                    i += 2;
                }
                ("--seed", Some(v)) => {
                    let Some(s) = parse_number("--seed", v) else {
                        return Command::Help;
                    };
                    seed = Some(s);
                    i += 2;
                }
                ("--values", Some(v)) => {
                    let Some(parsed) = parse_values(v) else {
                        eprintln!("Error: --values expects comma-separated integers, got '{v}'");
                        return Command::Help;
                    };
                    values = Some(parsed);
                    i += 2;
                }
                ("--format" | "-f", Some(v)) => {
                    format = match v.as_str() {
                        "text" => OutputFormat::Text,
                        "json" => OutputFormat::Json,
                        other => {
                            eprintln!("Error: unknown format '{other}' (expected text or json)");
                            return Command::Help;
                        }
                    };
                    i += 2;
                }
                ("--output" | "-o", Some(v)) => {
                    output = Some(PathBuf::from(v));
                    i += 2;
                }
                _ => i += 1,
            }
        }

        Command::Trace {
            algorithm: algorithm.clone(),
            size,
            seed,
            values,
            format,
            output,
        }
    }

    /// Parse the 'verify' command arguments.
    fn parse_verify_command(args: &[String]) -> Command {
        let mut size = None;
        let mut seed = None;
        let mut runs = 3;

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("--size" | "-n", Some(v)) => {
                    let Some(n) = parse_number("--size", v) else {
                        return Command::Help;
                    };
                    size = Some(n);
                    i += 2;
                }
                ("--seed", Some(v)) => {
                    let Some(s) = parse_number("--seed", v) else {
                        return Command::Help;
                    };
                    seed = Some(s);
                    i += 2;
                }
                ("--runs", Some(v)) => {
                    let Some(n) = parse_number("--runs", v) else {
                        return Command::Help;
                    };
                    runs = n;
                    i += 2;
                }
                _ => i += 1,
            }
        }

        Command::Verify { size, seed, runs }
    }

    /// Parse the 'replay' command arguments.
    fn parse_replay_command(args: &[String]) -> Command {
        match args.get(1) {
            Some(path) => Command::Replay {
                path: PathBuf::from(path),
            },
            None => {
                eprintln!("Error: 'replay' command requires a trace file path");
                Command::Help
            }
        }
    }

    /// Log level implied by `-v`/`-q`.
    #[must_use]
    pub const fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Parse a non-negative integer flag value, reporting failures on stderr.
fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Option<T> {
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        eprintln!("Error: {flag} expects a non-negative integer, got '{value}'");
    }
    parsed
}

/// Parse `"5,3,8,1"` into values; an empty string is an empty array.
fn parse_values(text: &str) -> Option<Vec<Value>> {
    let text = text.trim();
    if text.is_empty() {
        return Some(Vec::new());
    }
    text.split(',').map(|v| v.trim().parse().ok()).collect()
}
