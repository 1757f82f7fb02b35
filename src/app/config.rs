//! Configuration types for agent creation.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::{Hyperparameters, QLearningAgent, QTable},
    tictactoe::{GameOutcome, Player},
};

/// Where the Q-table is read from and written to unless configured otherwise
pub const DEFAULT_TABLE_PATH: &str = "qtable.csv";

/// Terminal rewards handed to the agent, from its own point of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardScheme {
    pub win: f64,
    pub loss: f64,
    pub draw: f64,
}

impl Default for RewardScheme {
    fn default() -> Self {
        Self {
            win: 1.0,
            loss: -1.0,
            draw: 0.1,
        }
    }
}

impl RewardScheme {
    /// Reward for `outcome` when the agent played as `role`
    pub fn reward_for(&self, outcome: GameOutcome, role: Player) -> f64 {
        match outcome {
            GameOutcome::Win(winner) if winner == role => self.win,
            GameOutcome::Win(_) => self.loss,
            GameOutcome::Draw => self.draw,
        }
    }
}

/// Configuration for creating a Q-learning agent.
///
/// # Examples
///
/// ```
/// use tictactoe_q::app::AgentConfig;
/// use tictactoe_q::q_learning::Hyperparameters;
///
/// let config = AgentConfig::new()
///     .with_hyperparameters(Hyperparameters::new(0.5, 0.9, 0.0))
///     .with_seed(42)
///     .with_table_path("trained.csv");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate, discount and exploration
    pub hyperparameters: Hyperparameters,
    /// Terminal rewards for win, loss and draw
    pub rewards: RewardScheme,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Persisted Q-table location
    pub table_path: PathBuf,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            hyperparameters: Hyperparameters::default(),
            rewards: RewardScheme::default(),
            seed: None,
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON configuration file. Missing keys take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| Error::io(format!("open config {}", path.display()), err))?;
        let config: AgentConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_hyperparameters(mut self, hyperparameters: Hyperparameters) -> Self {
        self.hyperparameters = hyperparameters;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_table_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.table_path = path.into();
        self
    }

    /// Check hyperparameter ranges and that every reward is finite.
    pub fn validate(&self) -> Result<()> {
        self.hyperparameters.validate()?;
        let rewards = [
            ("win", self.rewards.win),
            ("loss", self.rewards.loss),
            ("draw", self.rewards.draw),
        ];
        for (name, value) in rewards {
            if !value.is_finite() {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} reward {value} is not finite"),
                });
            }
        }
        Ok(())
    }

    /// Build an agent whose table is loaded from `table_path`.
    ///
    /// An absent or unreadable table leaves the agent starting empty.
    pub fn build_agent(&self) -> QLearningAgent {
        let agent = QLearningAgent::new(self.hyperparameters)
            .with_table(QTable::load_or_empty(&self.table_path));
        match self.seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        }
    }
}
