//! Per-game record of the agent's own decisions.

use crate::types::StateKey;

/// One decision by the agent: the board it saw and the cell it chose
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStep {
    pub state: StateKey,
    pub action: usize,
}

/// Ordered (state, action) pairs for the current game, oldest first.
///
/// Only the agent's moves are recorded; opponent moves never appear.
#[derive(Debug, Clone, Default)]
pub struct EpisodeTrace {
    steps: Vec<TraceStep>,
}

impl EpisodeTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: StateKey, action: usize) {
        self.steps.push(TraceStep { state, action });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Empty the trace, returning its steps most recent first.
    pub fn drain_newest_first(&mut self) -> std::iter::Rev<std::vec::IntoIter<TraceStep>> {
        std::mem::take(&mut self.steps).into_iter().rev()
    }
}
