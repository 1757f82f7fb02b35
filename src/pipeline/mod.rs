//! Game driver: turn sequencing, training runs and player adapters
//!
//! This module provides:
//! - [`GameSession`]: one game between the agent and an opponent
//! - [`TrainingPipeline`]: many sessions with outcome statistics
//! - Learner adapters for the Q-learning agent and scripted opponents
//! - Observers for progress reporting

pub mod learners;
pub mod observers;
pub mod session;
pub mod training;

pub use learners::{DefensiveLearner, QLearner, RandomLearner};
pub use observers::ProgressObserver;
pub use session::GameSession;
pub use training::{OutcomeTally, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
