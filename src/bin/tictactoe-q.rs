//! tictactoe-q CLI - play against, train and inspect a tabular Q-learning agent

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use tictactoe_q::cli::commands::{inspect, play, train};

#[derive(Parser)]
#[command(name = "tictactoe-q")]
#[command(version, about = "Tic-tac-toe against a tabular Q-learning agent", long_about = None)]
struct Cli {
    /// Log learning and persistence events (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the agent at the console
    Play(play::PlayArgs),

    /// Train the agent against a scripted opponent
    Train(Box<train::TrainArgs>),

    /// Inspect a saved Q-table
    Inspect(inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::Play(args) => play::execute(args),
        Commands::Train(args) => train::execute(*args),
        Commands::Inspect(args) => inspect::execute(args),
    }
}
