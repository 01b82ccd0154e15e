//! Matrix construction - a single streaming pass that turns text into encounters.
//!
//! The pass works as follows:
//! 1. **Match**: at every word boundary, find the longest alias ending there
//! 2. **Defer**: queue boundary results until a name (or a long run of
//!    non-names) decides them
//! 3. **Resolve**: drain the queue into the mention window, dropping aliases
//!    nested inside the name that triggered the drain
//! 4. **Tally**: link each resolved mention to the distinct characters already
//!    in the window
//!
//! Nothing is ever re-read: decisions only depend on the bounded trailing
//! context, the pending queue, and the window.

mod buffers;
mod matcher;
mod tally;

pub use buffers::*;
pub use matcher::*;
pub use tally::*;

use roster::Roster;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{NetworkError, NetworkResult};
use crate::matrix::EncounterMatrix;

/// Configuration for the construction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of mention slots considered "nearby".
    pub radius: usize,

    /// The pending queue is drained once it holds more than this many entries,
    /// even without a name to trigger it.
    pub flush_threshold: usize,

    /// Characters between progress reports.
    pub progress_interval: usize,

    /// Tally whatever is still pending when the text ends. Off by default:
    /// trailing candidates never get the lookahead that would decide them.
    pub drain_pending_at_end: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            radius: 15,
            flush_threshold: 7,
            progress_interval: 100_000,
            drain_pending_at_end: false,
        }
    }
}

impl ScanConfig {
    /// Create a config with the given radius and defaults elsewhere.
    pub fn with_radius(radius: usize) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> NetworkResult<()> {
        if self.radius == 0 {
            return Err(NetworkError::InvalidConfig("radius must be at least 1".into()));
        }
        if self.progress_interval == 0 {
            return Err(NetworkError::InvalidConfig(
                "progress_interval must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Progress of a running construction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    /// Characters consumed so far.
    pub position: usize,

    /// Total characters in the text.
    pub total: usize,
}

/// Builds encounter matrices from text.
pub struct MatrixConstructor {
    config: ScanConfig,
}

impl MatrixConstructor {
    /// Create a new constructor with the given configuration.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Create a constructor with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ScanConfig::default())
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Create a matrix over `roster` and build it from `text`.
    pub fn construct(&self, roster: Roster, text: &str) -> NetworkResult<EncounterMatrix> {
        let mut matrix = EncounterMatrix::new(roster);
        self.build(&mut matrix, text)?;
        Ok(matrix)
    }

    /// Scan `text` and accumulate its encounters into `matrix`.
    pub fn build(&self, matrix: &mut EncounterMatrix, text: &str) -> NetworkResult<()> {
        self.build_with_progress(matrix, text, |progress| {
            debug!(
                position = progress.position,
                total = progress.total,
                "Processing text"
            );
        })
    }

    /// Like [`build`](Self::build), reporting progress to `on_progress` every
    /// `progress_interval` characters.
    pub fn build_with_progress<F>(
        &self,
        matrix: &mut EncounterMatrix,
        text: &str,
        mut on_progress: F,
    ) -> NetworkResult<()>
    where
        F: FnMut(ScanProgress),
    {
        self.config.validate()?;
        if !matrix.is_modifiable() {
            return Err(NetworkError::Frozen);
        }

        let aliases = matrix.aliases().clone();
        let mut matcher = NameMatcher::new(&aliases, self.config.radius);
        let mut state = ScanState::new(&self.config);
        let total = text.chars().count();
        let before = matrix.encounter_count();

        for c in text.chars() {
            let position = matcher.position();
            if position > 0 && position % self.config.progress_interval == 0 {
                on_progress(ScanProgress { position, total });
            }

            if let Step::WordEnd(primary) = matcher.advance(c) {
                state.observe(matrix, primary)?;
            }
        }

        if self.config.drain_pending_at_end {
            state.flush(matrix, None)?;
        }

        info!(
            characters = total,
            encounters = matrix.encounter_count() - before,
            radius = self.config.radius,
            "Built encounter matrix"
        );
        Ok(())
    }
}

/// The deferred-decision state machine driven by word boundaries.
struct ScanState {
    pending: PendingBuffer,
    window: MentionWindow,
    flush_threshold: usize,
}

impl ScanState {
    fn new(config: &ScanConfig) -> Self {
        Self {
            pending: PendingBuffer::new(),
            window: MentionWindow::new(config.radius),
            flush_threshold: config.flush_threshold,
        }
    }

    fn observe(
        &mut self,
        matrix: &mut EncounterMatrix,
        primary: Option<NameCandidate>,
    ) -> NetworkResult<()> {
        if primary.is_some() || self.pending.len() > self.flush_threshold {
            self.flush(matrix, primary.as_ref())?;
        }

        // A lone non-name has nothing to wait for.
        if self.pending.is_empty() && primary.is_none() {
            self.window.push(None);
        } else {
            self.pending.push(primary);
        }
        Ok(())
    }

    fn flush(
        &mut self,
        matrix: &mut EncounterMatrix,
        primary: Option<&NameCandidate>,
    ) -> NetworkResult<()> {
        while let Some(entry) = self.pending.pop() {
            match entry {
                Some(candidate) if !primary.map_or(false, |p| candidate.is_nested_in(p)) => {
                    tally_neighbors(matrix, &candidate, &self.window)?;
                    self.window.push(Some(candidate.alias));
                }
                _ => {
                    self.window.push(None);
                }
            }
        }
        Ok(())
    }
}
