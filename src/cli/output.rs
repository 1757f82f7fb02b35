//! Output formatting and progress helpers for CLI

use crate::tictactoe::{BoardState, Cell};

/// Render the board as a grid with row and column indices
///
/// ```text
///     0   1   2
/// 0   X | O |
///    ---+---+---
/// 1     | X |
///    ---+---+---
/// 2     |   | O
/// ```
pub fn render_board(state: &BoardState) -> String {
    let mut out = String::from("    0   1   2\n");
    for row in 0..3 {
        let cells: Vec<char> = (0..3)
            .map(|col| match state.get(row * 3 + col) {
                Cell::Empty => ' ',
                cell => cell.to_char(),
            })
            .collect();
        out.push_str(&format!("{row}   {} | {} | {}\n", cells[0], cells[1], cells[2]));
        if row < 2 {
            out.push_str("   ---+---+---\n");
        }
    }
    out
}

pub fn print_section(title: &str) {
    let rule = "=".repeat(60);
    println!("\n{rule}\n{title}\n{rule}");
}

pub fn print_subsection(title: &str) {
    println!("\n{title}\n{}", "-".repeat(40));
}

/// `1234567` as `1,234,567`
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let head = match digits.len() % 3 {
        0 => 3,
        rem => rem,
    };
    let mut out = digits[..head].to_string();
    for group in digits.as_bytes()[head..].chunks(3) {
        out.push(',');
        out.extend(group.iter().map(|&b| b as char));
    }
    out
}

/// Aligned `key: value` line under a section
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<20} {value}", format!("{key}:"));
}
