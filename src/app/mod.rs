//! Application-level configuration for building agents.

pub mod config;

pub use config::{AgentConfig, DEFAULT_TABLE_PATH, RewardScheme};
