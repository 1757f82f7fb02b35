//! Play command - a human at the console against the learning agent

use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::{
    cli::{
        config::AgentArgs,
        console::{ConsoleObserver, HumanLearner},
    },
    pipeline::{GameSession, Learner, Observer, QLearner},
    tictactoe::{GameOutcome, Player},
};

/// The human always plays X; the agent plays O
const HUMAN: Player = Player::X;
const AI: Player = Player::O;

#[derive(Parser, Debug)]
#[command(about = "Play against the learning agent")]
pub struct PlayArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Let the agent make the first move
    #[arg(long, default_value_t = false)]
    pub ai_first: bool,

    /// Number of games to play before saving and exiting
    #[arg(long, short = 'r', default_value_t = 1)]
    pub rounds: usize,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let outcomes = run(
        &args,
        BufReader::new(io::stdin()),
        io::stdout(),
        io::stdout(),
    )?;
    info!("played {} games", outcomes.len());
    Ok(())
}

/// Play `args.rounds` games reading moves from `input`, then save the table.
///
/// Prompts go to `prompts`, boards and results to `display`. The table is
/// saved even if the human's input ends mid-game.
pub fn run<R, P, D>(args: &PlayArgs, input: R, prompts: P, display: D) -> Result<Vec<GameOutcome>>
where
    R: BufRead + Send,
    P: Write + Send,
    D: Write + Send + 'static,
{
    let config = args.agent.resolve()?;
    let agent = config.build_agent();
    let mut ai = QLearner::new(agent, config.rewards, "AI".to_string());
    let mut human = HumanLearner::new(input, prompts, "Human".to_string());

    let first_player = if args.ai_first { AI } else { HUMAN };
    let session = GameSession::new(AI, first_player);
    let mut observers: Vec<Box<dyn Observer>> = vec![Box::new(ConsoleObserver::new(display, HUMAN))];

    let mut outcomes = Vec::with_capacity(args.rounds);
    let played: Result<()> = (0..args.rounds).try_for_each(|round| {
        let (_, outcome) = session
            .play(round, &mut ai, &mut human, &mut observers)
            .with_context(|| format!("Game {} against {} failed", round + 1, human.name()))?;
        outcomes.push(outcome);
        Ok(())
    });

    let saved = ai
        .agent()
        .save_table(&config.table_path)
        .with_context(|| format!("Failed to save Q-table to {}", config.table_path.display()));

    played?;
    saved?;
    Ok(outcomes)
}
