//! The eight lines that decide a game

use super::{Cell, Player};

/// Rows, then columns, then the two diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Line queries over a raw cell array
pub struct LineAnalyzer;

impl LineAnalyzer {
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let mark = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.map(|pos| cells[pos]) == [mark; 3])
    }

    /// Cells where `player` would complete a line right now, ascending.
    pub fn winning_moves(cells: &[Cell; 9], player: Player) -> Vec<usize> {
        let mark = player.to_cell();
        let mut moves: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| {
                let owned = line.iter().filter(|&&pos| cells[pos] == mark).count();
                let mut gaps = line.iter().filter(|&&pos| cells[pos] == Cell::Empty);
                match (owned, gaps.next(), gaps.next()) {
                    (2, Some(&gap), None) => Some(gap),
                    _ => None,
                }
            })
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }
}
