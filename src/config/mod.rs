//! Configuration system with YAML schema and validation.
//!
//! Mistake-proofing happens in two layers:
//! - Schema validation via `validator` derive (per-field ranges)
//! - Semantic validation across fields (ordered bounds, size inside bounds)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::engine::registry::AlgorithmId;
use crate::engine::rng::{DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE};
use crate::engine::Value;
use crate::error::{SortError, SortResult};

/// Top-level visualizer configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VisualizerConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Algorithm selected at startup.
    #[serde(default)]
    pub algorithm: AlgorithmId,

    /// Seed for the array generator; drawn from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Array sizing and value range.
    #[validate(nested)]
    #[serde(default)]
    pub array: ArrayConfig,

    /// Playback speed and tick intervals.
    #[validate(nested)]
    #[serde(default)]
    pub playback: PlaybackConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl VisualizerConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SortResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SortResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize configuration to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SortResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing constraint.
    pub fn check(&self) -> SortResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> VisualizerConfigBuilder {
        VisualizerConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> SortResult<()> {
        let array = &self.array;
        if array.min_size > array.max_size {
            return Err(SortError::config(format!(
                "array.min_size {} exceeds array.max_size {}",
                array.min_size, array.max_size
            )));
        }
        if !(array.min_size..=array.max_size).contains(&array.size) {
            return Err(SortError::config(format!(
                "array.size {} outside [{}, {}]",
                array.size, array.min_size, array.max_size
            )));
        }
        if array.min_value > array.max_value {
            return Err(SortError::config(format!(
                "array.min_value {} exceeds array.max_value {}",
                array.min_value, array.max_value
            )));
        }

        let playback = &self.playback;
        if playback.min_interval_ms > playback.max_interval_ms {
            return Err(SortError::config(format!(
                "playback.min_interval_ms {} exceeds playback.max_interval_ms {}",
                playback.min_interval_ms, playback.max_interval_ms
            )));
        }

        Ok(())
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            algorithm: AlgorithmId::default(),
            seed: None,
            array: ArrayConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VisualizerConfigBuilder {
    algorithm: Option<AlgorithmId>,
    seed: Option<u64>,
    size: Option<usize>,
    speed: Option<u8>,
    verify_traces: Option<bool>,
}

impl VisualizerConfigBuilder {
    /// Set the startup algorithm.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the generator seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the initial array size.
    #[must_use]
    pub const fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the initial speed percentage.
    #[must_use]
    pub const fn speed(mut self, speed: u8) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Enable or disable guard checks on freshly computed traces.
    #[must_use]
    pub const fn verify_traces(mut self, verify: bool) -> Self {
        self.verify_traces = Some(verify);
        self
    }

    /// Build the configuration.
    ///
    /// A size outside the default bounds widens the bounds to include it.
    #[must_use]
    pub fn build(self) -> VisualizerConfig {
        let mut config = VisualizerConfig::default();

        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        config.seed = self.seed;

        if let Some(size) = self.size {
            config.array.size = size;
            config.array.min_size = config.array.min_size.min(size);
            config.array.max_size = config.array.max_size.max(size);
        }

        if let Some(speed) = self.speed {
            config.playback.speed = speed.clamp(1, 100);
        }

        if let Some(verify) = self.verify_traces {
            config.playback.verify_traces = verify;
        }

        config
    }
}

/// Array sizing and value range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ArrayConfig {
    /// Initial number of bars.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Smallest size the controls allow.
    #[serde(default = "default_min_size")]
    pub min_size: usize,
    /// Largest size the controls allow.
    #[validate(range(min = 1, max = 100_000))]
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Increment used by size controls.
    #[validate(range(min = 1))]
    #[serde(default = "default_size_step")]
    pub size_step: usize,
    /// Lowest generated value.
    #[serde(default = "default_min_value")]
    pub min_value: Value,
    /// Highest generated value (inclusive).
    #[serde(default = "default_max_value")]
    pub max_value: Value,
}

const fn default_size() -> usize {
    50
}

const fn default_min_size() -> usize {
    10
}

const fn default_max_size() -> usize {
    150
}

const fn default_size_step() -> usize {
    5
}

const fn default_min_value() -> Value {
    DEFAULT_MIN_VALUE
}

const fn default_max_value() -> Value {
    DEFAULT_MAX_VALUE
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            size_step: default_size_step(),
            min_value: default_min_value(),
            max_value: default_max_value(),
        }
    }
}

impl ArrayConfig {
    /// Clamp a requested size into `[min_size, max_size]`.
    #[must_use]
    pub fn clamp_size(&self, size: usize) -> usize {
        size.clamp(self.min_size, self.max_size)
    }
}

/// Playback speed and tick interval bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PlaybackConfig {
    /// Initial speed percentage.
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_speed")]
    pub speed: u8,
    /// Tick interval at speed 100, in milliseconds.
    #[validate(range(min = 1))]
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    /// Tick interval at speed 1, in milliseconds.
    #[validate(range(min = 1))]
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,
    /// Run the trace guard on every freshly computed trace.
    #[serde(default)]
    pub verify_traces: bool,
    /// Steps between scrubbing checkpoints.
    #[validate(range(min = 1))]
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,
}

const fn default_speed() -> u8 {
    100
}

const fn default_min_interval_ms() -> u64 {
    100
}

const fn default_max_interval_ms() -> u64 {
    991
}

const fn default_checkpoint_interval() -> usize {
    64
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            min_interval_ms: default_min_interval_ms(),
            max_interval_ms: default_max_interval_ms(),
            verify_traces: false,
            checkpoint_interval: default_checkpoint_interval(),
        }
    }
}

impl PlaybackConfig {
    /// Interval at the fastest speed.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Interval at the slowest speed.
    #[must_use]
    pub const fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }
}
