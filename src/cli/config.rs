//! Agent options shared by the CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AgentConfig;

/// Flags that build an [`AgentConfig`]; explicit flags override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct AgentArgs {
    /// Q-table file (one `state,action,value` record per line)
    #[arg(long, short = 't')]
    pub table: Option<PathBuf>,

    /// JSON configuration file with hyperparameters, rewards and seed
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Learning rate α
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Exploration probability ε
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AgentArgs {
    /// Merge the config file (if any) with the explicit flags and validate.
    pub fn resolve(&self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => AgentConfig::default(),
        };

        if let Some(table) = &self.table {
            config.table_path = table.clone();
        }
        if let Some(alpha) = self.alpha {
            config.hyperparameters.learning_rate = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.hyperparameters.discount_factor = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            config.hyperparameters.epsilon = epsilon;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate().context("Invalid agent configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = AgentArgs {
            table: Some(PathBuf::from("custom.csv")),
            epsilon: Some(0.0),
            seed: Some(4),
            ..AgentArgs::default()
        };

        let config = args.resolve().unwrap();
        assert_eq!(config.table_path, PathBuf::from("custom.csv"));
        assert_eq!(config.hyperparameters.epsilon, 0.0);
        assert_eq!(config.hyperparameters.learning_rate, 0.5);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let args = AgentArgs {
            alpha: Some(0.0),
            ..AgentArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
