//! Replay and scrubbing over recorded traces.
//!
//! Implements:
//! - Periodic checkpoints of playback state while a trace is replayed
//! - Scrubbing to any cursor position (nearest checkpoint + forward replay)
//! - Versioned trace files for exporting and re-importing runs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::engine::registry::AlgorithmId;
use crate::engine::Trace;
use crate::error::{SortError, SortResult};
use crate::playback::PlaybackState;

/// Playback state captured at a cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Cursor the state was captured at.
    pub cursor: usize,
    /// Captured state.
    pub state: PlaybackState,
}

/// Checkpoint manager for incremental checkpointing.
#[derive(Debug, Clone)]
pub struct CheckpointManager {
    /// Checkpoints indexed by cursor.
    checkpoints: BTreeMap<usize, Checkpoint>,
    /// Checkpoint interval in steps.
    interval: usize,
    /// Maximum number of stored checkpoints.
    max_checkpoints: usize,
}

impl CheckpointManager {
    /// Create a new checkpoint manager.
    ///
    /// An interval of zero is treated as one.
    #[must_use]
    pub fn new(interval: usize, max_checkpoints: usize) -> Self {
        Self {
            checkpoints: BTreeMap::new(),
            interval: interval.max(1),
            max_checkpoints,
        }
    }

    /// Check if a checkpoint should be taken at this cursor.
    #[must_use]
    pub const fn should_checkpoint(&self, cursor: usize) -> bool {
        cursor % self.interval == 0
    }

    /// Store a checkpoint of `state` at its cursor.
    pub fn checkpoint(&mut self, state: &PlaybackState) {
        while self.checkpoints.len() >= self.max_checkpoints && !self.checkpoints.is_empty() {
            self.remove_oldest();
        }
        if self.max_checkpoints == 0 {
            return;
        }
        self.checkpoints.insert(
            state.cursor,
            Checkpoint {
                cursor: state.cursor,
                state: state.clone(),
            },
        );
    }

    /// Store a checkpoint only if the cursor lands on the interval.
    pub fn observe(&mut self, state: &PlaybackState) {
        if self.should_checkpoint(state.cursor) && !self.checkpoints.contains_key(&state.cursor) {
            self.checkpoint(state);
        }
    }

    /// Get checkpoint at or before given cursor.
    #[must_use]
    pub fn get_checkpoint_at(&self, cursor: usize) -> Option<&Checkpoint> {
        self.checkpoints
            .range(..=cursor)
            .next_back()
            .map(|(_, cp)| cp)
    }

    /// Remove oldest checkpoint.
    fn remove_oldest(&mut self) {
        if let Some((&cursor, _)) = self.checkpoints.iter().next() {
            self.checkpoints.remove(&cursor);
        }
    }

    /// Get number of stored checkpoints.
    #[must_use]
    pub fn num_checkpoints(&self) -> usize {
        self.checkpoints.len()
    }
}

/// Random-access player over one trace.
///
/// Produces, for any cursor, exactly the state a live playback would have
/// after applying that many steps.
#[derive(Debug, Clone)]
pub struct TraceScrubber {
    trace: Trace,
    checkpoints: CheckpointManager,
}

impl TraceScrubber {
    /// Default cap on stored checkpoints.
    pub const MAX_CHECKPOINTS: usize = 1024;

    /// Create a scrubber; the initial state is checkpointed at cursor 0.
    #[must_use]
    pub fn new(trace: Trace, checkpoint_interval: usize) -> Self {
        let mut checkpoints = CheckpointManager::new(checkpoint_interval, Self::MAX_CHECKPOINTS);
        checkpoints.checkpoint(&PlaybackState::new(trace.input().to_vec()));
        Self { trace, checkpoints }
    }

    /// Trace being scrubbed.
    #[must_use]
    pub const fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Checkpoints recorded so far.
    #[must_use]
    pub const fn checkpoints(&self) -> &CheckpointManager {
        &self.checkpoints
    }

    /// Let a live playback contribute checkpoints as it advances.
    pub fn observe(&mut self, state: &PlaybackState) {
        self.checkpoints.observe(state);
    }

    /// Rebuild the playback state after `target` steps.
    ///
    /// # Errors
    ///
    /// Returns `SortError::SeekOutOfRange` if `target` exceeds the trace length.
    pub fn seek_to(&mut self, target: usize) -> SortResult<PlaybackState> {
        let len = self.trace.len();
        if target > len {
            return Err(SortError::SeekOutOfRange { target, len });
        }

        let mut state = self.checkpoints.get_checkpoint_at(target).map_or_else(
            || PlaybackState::new(self.trace.input().to_vec()),
            |cp| cp.state.clone(),
        );

        while state.cursor < target {
            let Some(step) = self.trace.get(state.cursor) else {
                break;
            };
            state.apply(step);
            self.checkpoints.observe(&state);
        }

        Ok(state)
    }
}

/// Current trace file schema version.
pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// Versioned, self-describing trace document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFile {
    /// Schema version of the document.
    pub schema_version: String,
    /// Algorithm that produced the trace.
    pub algorithm: AlgorithmId,
    /// Generator seed, if the input was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Recorded trace, input included.
    pub trace: Trace,
}

impl TraceFile {
    /// Wrap a trace in the current schema.
    #[must_use]
    pub fn new(algorithm: AlgorithmId, seed: Option<u64>, trace: Trace) -> Self {
        Self {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            algorithm,
            seed,
            trace,
        }
    }

    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> SortResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON, rejecting unknown major versions.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or the schema is unsupported.
    pub fn from_json(json: &str) -> SortResult<Self> {
        let file: Self = serde_json::from_str(json)?;
        let major = file.schema_version.split('.').next().unwrap_or_default();
        let supported = TRACE_SCHEMA_VERSION.split('.').next().unwrap_or_default();
        if major != supported {
            return Err(SortError::serialization(format!(
                "unsupported trace schema version {}",
                file.schema_version
            )));
        }
        Ok(file)
    }

    /// Write to `path` as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SortResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the read or decoding fails.
    pub fn load<P: AsRef<Path>>(path: P) -> SortResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
