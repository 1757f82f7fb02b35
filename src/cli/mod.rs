//! CLI infrastructure for playing against and training the agent

pub mod commands;
pub mod config;
pub mod console;
pub mod output;
