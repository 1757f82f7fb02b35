//! Tabular Q-learning agent
//!
//! The agent picks moves ε-greedily from its Q-table and remembers each of its
//! own decisions. Once a game ends, the terminal reward is walked backwards
//! through those decisions, discounted by γ per step, and every visited entry
//! moves a fraction α toward the reward it received.

use std::path::Path;

use log::{debug, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::{episode::EpisodeTrace, q_table::QTable},
    types::StateKey,
};

/// Fixed learning configuration, set at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyperparameters {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ applied per earlier move
    pub discount_factor: f64,
    /// Exploration probability ε
    pub epsilon: f64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            discount_factor: 0.9,
            epsilon: 0.1,
        }
    }
}

impl Hyperparameters {
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
            epsilon,
        }
    }

    /// Check that every parameter lies in its meaningful range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        let check = |name: &str, value: f64, ok: bool| {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration {
                    message: format!("{name} {value} is out of range"),
                })
            }
        };
        check(
            "learning rate",
            self.learning_rate,
            self.learning_rate > 0.0 && self.learning_rate <= 1.0,
        )?;
        check(
            "discount factor",
            self.discount_factor,
            (0.0..=1.0).contains(&self.discount_factor),
        )?;
        check(
            "epsilon",
            self.epsilon,
            (0.0..=1.0).contains(&self.epsilon),
        )
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent that learns from whole-game outcomes
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    params: Hyperparameters,
    trace: EpisodeTrace,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent with an empty Q-table
    pub fn new(params: Hyperparameters) -> Self {
        Self {
            q_table: QTable::new(),
            params,
            trace: EpisodeTrace::new(),
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Replace the Q-table the agent starts from
    pub fn with_table(mut self, q_table: QTable) -> Self {
        self.q_table = q_table;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
    }

    /// ε-greedy choice among `legal_actions`, recorded in the episode trace.
    ///
    /// Exploitation returns the first action with the highest Q-value in the
    /// order the caller listed them.
    ///
    /// # Panics
    ///
    /// Panics if `legal_actions` is empty; the driver must not ask for a move
    /// on a finished board.
    pub fn select_move(&mut self, state: &StateKey, legal_actions: &[usize]) -> usize {
        assert!(
            !legal_actions.is_empty(),
            "select_move called with no legal actions for state {state}"
        );

        let action = if self.rng.random::<f64>() < self.params.epsilon {
            legal_actions[self.rng.random_range(0..legal_actions.len())]
        } else {
            self.q_table
                .greedy_action(state, legal_actions)
                .unwrap_or(legal_actions[0])
        };

        self.trace.record(state.clone(), action);
        action
    }

    /// Propagate the game's terminal reward back through the trace and clear it.
    ///
    /// The most recent move is pulled toward `final_reward`, the one before it
    /// toward `final_reward * γ`, and so on. Returns the number of entries updated.
    ///
    /// # Panics
    ///
    /// Panics if no move was selected since the previous propagation.
    pub fn propagate_outcome(&mut self, final_reward: f64) -> usize {
        assert!(
            !self.trace.is_empty(),
            "propagate_outcome called with an empty episode trace"
        );

        let mut reward = final_reward;
        let mut updated = 0;
        for step in self.trace.drain_newest_first() {
            let new_q = self.q_table.nudge_toward(
                step.state.clone(),
                step.action,
                reward,
                self.params.learning_rate,
            );
            debug!(
                "Q({}, {}) <- {new_q:.6} (target {reward:.6})",
                step.state, step.action
            );
            reward *= self.params.discount_factor;
            updated += 1;
        }
        updated
    }

    /// Start a new game, dropping any steps left by a game that never reached
    /// [`propagate_outcome`](Self::propagate_outcome). Returns how many were dropped.
    pub fn begin_episode(&mut self) -> usize {
        let stale = self.trace.len();
        if stale > 0 {
            warn!("discarding {stale} moves from an unfinished game");
            self.trace.clear();
        }
        stale
    }

    /// Replace the Q-table with the one stored at `path`.
    ///
    /// A missing or malformed file leaves the agent with an empty table.
    pub fn load_table<P: AsRef<Path>>(&mut self, path: P) {
        self.q_table = QTable::load_or_empty(path);
    }

    /// Write the Q-table to `path`; the in-memory table stays usable on failure.
    pub fn save_table<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.q_table.save(path)
    }

    pub fn table(&self) -> &QTable {
        &self.q_table
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.params
    }

    pub fn trace(&self) -> &EpisodeTrace {
        &self.trace
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    fn greedy_agent(learning_rate: f64, discount_factor: f64) -> QLearningAgent {
        QLearningAgent::new(Hyperparameters::new(learning_rate, discount_factor, 0.0)).with_seed(7)
    }

    #[test]
    fn test_default_hyperparameters_are_valid() {
        assert!(Hyperparameters::default().validate().is_ok());
    }

    #[test]
    fn test_hyperparameter_validation() {
        assert!(Hyperparameters::new(0.0, 0.9, 0.1).validate().is_err());
        assert!(Hyperparameters::new(1.5, 0.9, 0.1).validate().is_err());
        assert!(Hyperparameters::new(0.5, -0.1, 0.1).validate().is_err());
        assert!(Hyperparameters::new(0.5, 0.9, 1.01).validate().is_err());
        assert!(Hyperparameters::new(0.5, f64::NAN, 0.1).validate().is_err());
        assert!(Hyperparameters::new(1.0, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_greedy_selection_prefers_highest_value() {
        let mut table = QTable::new();
        let state = key(".........");
        table.set(state.clone(), 2, 0.3);
        table.set(state.clone(), 6, 0.9);

        let mut agent = greedy_agent(0.5, 0.9).with_table(table);
        assert_eq!(agent.select_move(&state, &[0, 2, 6, 8]), 6);
    }

    #[test]
    fn test_selection_is_deterministic_without_exploration() {
        let mut agent = greedy_agent(0.5, 0.9);
        let state = key("X...O....");
        let legal = [1, 2, 3, 5, 6, 7, 8];

        let first = agent.select_move(&state, &legal);
        for _ in 0..20 {
            assert_eq!(agent.select_move(&state, &legal), first);
        }
        // Untrained table: everything ties at 0.0, so the first listed action wins
        assert_eq!(first, 1);
    }

    #[test]
    fn test_select_move_records_trace() {
        let mut agent = greedy_agent(0.5, 0.9);
        agent.select_move(&key("........."), &[4, 0]);
        agent.select_move(&key("X...O...X"), &[1, 2]);

        let steps = agent.trace().steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].state, key("........."));
        assert_eq!(steps[0].action, 4);
        assert_eq!(steps[1].action, 1);
    }

    #[test]
    fn test_full_exploration_stays_within_legal_actions() {
        let mut agent = QLearningAgent::new(Hyperparameters::new(0.5, 0.9, 1.0)).with_seed(3);
        let state = key(".........");
        for _ in 0..200 {
            let action = agent.select_move(&state, &[1, 5, 7]);
            assert!([1, 5, 7].contains(&action));
        }
    }

    #[test]
    fn test_single_step_update() {
        let mut agent = greedy_agent(0.5, 0.9);
        let state = key(".........");
        agent.select_move(&state, &[4]);

        assert_eq!(agent.propagate_outcome(1.0), 1);
        assert_eq!(agent.table().get(&state, 4), 0.5);
    }

    #[test]
    fn test_backward_update_discounts_earlier_moves() {
        let (alpha, gamma, reward) = (0.5, 0.9, 1.0);
        let mut agent = greedy_agent(alpha, gamma);
        let s1 = key(".........");
        let s2 = key("O...X....");
        agent.select_move(&s1, &[0]);
        agent.select_move(&s2, &[8]);

        agent.propagate_outcome(reward);

        assert!((agent.table().get(&s2, 8) - alpha * reward).abs() < 1e-12);
        assert!((agent.table().get(&s1, 0) - alpha * gamma * reward).abs() < 1e-12);
    }

    #[test]
    fn test_update_moves_toward_negative_reward() {
        let state = key("X...O....");
        let mut table = QTable::new();
        table.set(state.clone(), 8, 0.4);

        let mut agent = greedy_agent(0.25, 0.9).with_table(table);
        agent.select_move(&state, &[8]);
        agent.propagate_outcome(-1.0);

        // 0.4 + 0.25 * (-1.0 - 0.4)
        assert!((agent.table().get(&state, 8) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_trace_restarts_after_propagation() {
        let mut agent = greedy_agent(0.5, 0.9);
        agent.select_move(&key("........."), &[0]);
        agent.select_move(&key("XO......."), &[2]);
        agent.propagate_outcome(0.1);
        assert!(agent.trace().is_empty());

        agent.select_move(&key("........."), &[4]);
        assert_eq!(agent.trace().len(), 1);
    }

    #[test]
    fn test_begin_episode_drops_unfinished_game() {
        let mut agent = greedy_agent(0.5, 0.9);
        agent.select_move(&key("........."), &[0]);
        agent.select_move(&key("XO......."), &[2]);

        assert_eq!(agent.begin_episode(), 2);
        assert!(agent.trace().is_empty());
        assert_eq!(agent.begin_episode(), 0);

        let state = key("....X....");
        agent.select_move(&state, &[0]);
        agent.propagate_outcome(1.0);
        assert_eq!(agent.table().len(), 1);
        assert_eq!(agent.table().get(&state, 0), 0.5);
    }

    #[test]
    #[should_panic(expected = "no legal actions")]
    fn test_select_move_without_actions_panics() {
        let mut agent = greedy_agent(0.5, 0.9);
        agent.select_move(&key("XOXOXOOXO"), &[]);
    }

    #[test]
    #[should_panic(expected = "empty episode trace")]
    fn test_double_propagation_panics() {
        let mut agent = greedy_agent(0.5, 0.9);
        agent.select_move(&key("........."), &[4]);
        agent.propagate_outcome(1.0);
        agent.propagate_outcome(1.0);
    }
}
