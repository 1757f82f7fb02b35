//! Q-table mapping (state key, action) pairs to learned values

use std::collections::{HashMap, HashSet};

use crate::types::StateKey;

/// Value reported for any pair that has never been written
pub const DEFAULT_Q_VALUE: f64 = 0.0;

/// Q-table mapping (state, action) pairs to Q-values
///
/// Entries appear on first write and are never removed, so the table only
/// grows over a process lifetime and across saved sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    /// Q-values: (state_key, action_position) -> Q-value
    q_values: HashMap<(StateKey, usize), f64>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &StateKey, action: usize) -> f64 {
        self.q_values
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or(DEFAULT_Q_VALUE)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateKey, action: usize, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Move the stored value a fraction `learning_rate` of the way toward `target`.
    ///
    /// Q(s,a) ← Q(s,a) + α[target - Q(s,a)]
    ///
    /// Returns the new value.
    pub fn nudge_toward(
        &mut self,
        state: StateKey,
        action: usize,
        target: f64,
        learning_rate: f64,
    ) -> f64 {
        let current_q = self.get(&state, action);
        let new_q = current_q + learning_rate * (target - current_q);
        self.set(state, action, new_q);
        new_q
    }

    /// Q-values of each legal action, in the order given
    pub fn action_values(&self, state: &StateKey, legal_actions: &[usize]) -> Vec<(usize, f64)> {
        legal_actions
            .iter()
            .map(|&action| (action, self.get(state, action)))
            .collect()
    }

    /// Select greedy action (highest Q-value) from legal actions.
    ///
    /// Ties go to the action that appears first in `legal_actions`. Returns
    /// `None` only when `legal_actions` is empty.
    pub fn greedy_action(&self, state: &StateKey, legal_actions: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (action, value) in self.action_values(state, legal_actions) {
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Iterate over every stored entry in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, usize, f64)> {
        self.q_values
            .iter()
            .map(|((state, action), value)| (state, *action, *value))
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Number of distinct states with at least one stored value
    pub fn state_count(&self) -> usize {
        self.q_values
            .keys()
            .map(|(state, _)| state)
            .collect::<HashSet<_>>()
            .len()
    }
}
