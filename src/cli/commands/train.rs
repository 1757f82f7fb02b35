//! Train command - train the agent against a scripted opponent

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    app::RewardScheme,
    cli::{
        config::AgentArgs,
        output::{format_number, print_kv, print_section},
    },
    pipeline::{
        DefensiveLearner, Learner, ProgressObserver, QLearner, RandomLearner, TrainingConfig,
        TrainingPipeline, TrainingResult,
    },
    q_learning::Hyperparameters,
    tictactoe::{Cell, Player},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    /// Uniformly random moves
    Random,
    /// Wins when it can, blocks when it must, otherwise random
    Defensive,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    opponent: OpponentKind,
    agent_player: String,
    first_player: String,
    hyperparameters: Hyperparameters,
    rewards: RewardScheme,
    seed: Option<u64>,
    table_entries: usize,
    table_states: usize,
}

/// Read a side from a flag value: a single `x` or `o`, any case.
pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    let mut chars = value.trim().chars();
    match (chars.next().and_then(Cell::from_char), chars.next()) {
        (Some(Cell::X), None) => Ok(Player::X),
        (Some(Cell::O), None) => Ok(Player::O),
        _ => bail!("{flag} expects x or o, got '{value}'"),
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Opponent to train against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Which token the agent controls (`x` or `o`)
    #[arg(long, default_value = "o")]
    pub agent_player: String,

    /// Which token makes the first move (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub first_player: String,

    /// Optional path for writing a summary JSON file (`.json` is appended when missing)
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.agent.resolve()?;
    let agent_player = parse_player_token(&args.agent_player, "--agent-player")?;
    let first_player = parse_player_token(&args.first_player, "--first-player")?;

    let mut learner = QLearner::new(config.build_agent(), config.rewards, "Q-Learning".to_string());
    let mut opponent: Box<dyn Learner> = match args.opponent {
        OpponentKind::Random => Box::new(RandomLearner::new("Random".to_string())),
        OpponentKind::Defensive => Box::new(DefensiveLearner::new("Defensive".to_string())),
    };

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: args.games,
        seed: config.seed,
        agent_player,
        first_player,
    });
    if !args.quiet {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new(agent_player)));
    }

    let result = pipeline.run(&mut learner, opponent.as_mut())?;

    let agent = learner.agent();
    agent
        .save_table(&config.table_path)
        .with_context(|| format!("Failed to save Q-table to {}", config.table_path.display()))?;

    print_section(&format!("Training vs {}", opponent.name()));
    print_kv("Games", &format_number(result.total_games));
    print_kv("Wins", &format!("{} ({:.1}%)", result.wins, result.win_rate * 100.0));
    print_kv("Draws", &format!("{} ({:.1}%)", result.draws, result.draw_rate * 100.0));
    print_kv("Losses", &format!("{} ({:.1}%)", result.losses, result.loss_rate * 100.0));
    print_kv("Q-values", &format_number(agent.table().len()));
    print_kv("States", &format_number(agent.table().state_count()));
    print_kv("Saved to", &config.table_path.display().to_string());

    if let Some(requested) = &args.summary {
        let path = if requested.extension().is_none() {
            requested.with_extension("json")
        } else {
            requested.clone()
        };
        let summary = TrainingSummaryFile {
            training: result,
            opponent: args.opponent,
            agent_player: agent_player.to_string(),
            first_player: first_player.to_string(),
            hyperparameters: *agent.hyperparameters(),
            rewards: config.rewards,
            seed: config.seed,
            table_entries: agent.table().len(),
            table_states: agent.table().state_count(),
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
        to_writer_pretty(file, &summary).context("Failed to write training summary")?;
    }

    Ok(())
}
