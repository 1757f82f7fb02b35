//! Tabular Q-learning with backward reward propagation
//!
//! This module holds the learning core of the crate:
//!
//! - [`QTable`]: (state key, action) → value, 0.0 for anything unseen
//! - [`serialization`]: the flat `state,action,value` file the table lives in
//! - [`EpisodeTrace`]: the agent's own moves during the current game
//! - [`QLearningAgent`]: ε-greedy move selection and end-of-game updates
//!
//! ## Update rule
//!
//! After a game ends with reward `R`, the agent's moves are visited newest
//! first with a running reward `r`, starting at `R`:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α (r − Q(s,a))
//! r      ← r · γ
//! ```
//!
//! No successor-state term is used: `r` is already the discounted terminal
//! reward for that move.
//!
//! ## Usage Example
//!
//! ```
//! use tictactoe_q::q_learning::{Hyperparameters, QLearningAgent};
//! use tictactoe_q::types::StateKey;
//!
//! let mut agent = QLearningAgent::new(Hyperparameters::new(0.5, 0.9, 0.0));
//! let state = StateKey::parse(".........").unwrap();
//! let action = agent.select_move(&state, &[4]);
//! agent.propagate_outcome(1.0);
//! assert_eq!(agent.table().get(&state, action), 0.5);
//! ```

pub mod agent;
pub mod episode;
pub mod q_table;
pub mod serialization;

pub use agent::{Hyperparameters, QLearningAgent};
pub use episode::{EpisodeTrace, TraceStep};
pub use q_table::{DEFAULT_Q_VALUE, QTable};
pub use serialization::{read_table, write_table};
