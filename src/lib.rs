//! Tabular Q-learning for tic-tac-toe
//!
//! The crate is split into:
//! - [`tictactoe`]: board, moves and terminal detection
//! - [`types`]: the textual state key the learner indexes by
//! - [`q_learning`]: the Q-table, its CSV persistence and the ε-greedy agent
//! - [`pipeline`] and [`ports`]: game sessions, opponents and training
//! - [`cli`]: the `tictactoe-q` command line front end

pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use q_learning::{Hyperparameters, QLearningAgent, QTable};
pub use types::{StateKey, encode};
