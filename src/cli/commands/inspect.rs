//! Inspect command - look inside a saved Q-table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::DEFAULT_TABLE_PATH,
    cli::output::{format_number, print_kv, print_section, print_subsection, render_board},
    q_learning::QTable,
    tictactoe::{BoardState, row_col},
    types::StateKey,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a saved Q-table")]
pub struct InspectArgs {
    /// Q-table file to read
    #[arg(long, short = 't', default_value = DEFAULT_TABLE_PATH)]
    pub table: PathBuf,

    /// Show the values for one board (9 cells of `.`, `X`, `O`, row-major)
    #[arg(long, short = 'b')]
    pub board: Option<String>,

    /// Number of highest-valued entries to list when no board is given
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let table = QTable::load(&args.table)
        .with_context(|| format!("Failed to load Q-table from {}", args.table.display()))?;

    print_section(&format!("Q-table {}", args.table.display()));
    print_kv("Q-values", &format_number(table.len()));
    print_kv("States", &format_number(table.state_count()));

    match &args.board {
        Some(board) => print_board_values(&table, board),
        None => {
            print_top_entries(&table, args.top);
            Ok(())
        }
    }
}

fn print_board_values(table: &QTable, board: &str) -> Result<()> {
    let state = BoardState::from_string(board)?;
    let key = StateKey::from(&state);

    print_subsection("Board");
    print!("{}", render_board(&state));

    let legal = state.legal_moves();
    if legal.is_empty() {
        println!("No legal moves: the game is over.");
        return Ok(());
    }

    print_subsection(&format!("Values for {} to move", state.to_move));
    for (action, value) in table.action_values(&key, &legal) {
        let (row, col) = row_col(action);
        println!("  {action} ({row}, {col}): {value:>8.4}");
    }
    if let Some(best) = table.greedy_action(&key, &legal) {
        let (row, col) = row_col(best);
        print_kv("Greedy move", &format!("{best} ({row}, {col})"));
    }
    Ok(())
}

fn print_top_entries(table: &QTable, top: usize) {
    if top == 0 || table.is_empty() {
        return;
    }

    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by(|a, b| {
        b.2.total_cmp(&a.2)
            .then_with(|| a.0.cmp(b.0))
            .then_with(|| a.1.cmp(&b.1))
    });

    print_subsection(&format!("Top {} entries", top.min(entries.len())));
    for (state, action, value) in entries.into_iter().take(top) {
        println!("  {state} {action} {value:>8.4}");
    }
}
