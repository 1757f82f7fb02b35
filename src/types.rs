//! State keys: the addressing scheme for the Q-table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{BoardState, Cell};

/// Canonical string token for a board: one marker per cell in row-major order.
///
/// Boards with identical cell contents always produce identical keys. No
/// symmetry reduction is applied, so rotated or mirrored boards stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Number of characters in every key
    pub const LEN: usize = 9;

    /// Parse and validate a key read from outside the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not exactly nine valid cell markers.
    pub fn parse(token: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = token.chars().collect();
        let cells = BoardState::parse_cells(&chars, token)?;
        Ok(Self::from_cells(&cells))
    }

    fn from_cells(cells: &[Cell; 9]) -> Self {
        StateKey(cells.iter().map(|&c| c.to_char()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Encode a board snapshot as its state key.
///
/// ```
/// use tictactoe_q::{tictactoe::BoardState, types::encode};
///
/// let board = BoardState::new().make_move(4).unwrap();
/// assert_eq!(encode(&board).as_str(), "....X....");
/// ```
pub fn encode(board: &BoardState) -> StateKey {
    StateKey::from_cells(&board.cells)
}

impl From<&BoardState> for StateKey {
    fn from(board: &BoardState) -> Self {
        encode(board)
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_encode_empty_board() {
        let key = encode(&BoardState::new());
        assert_eq!(key.as_str(), ".........");
        assert_eq!(key.as_str().len(), StateKey::LEN);
    }

    #[test]
    fn test_encode_is_row_major() {
        let board = BoardState::from_string("X.O......").unwrap();
        assert_eq!(encode(&board).as_str(), "X.O......");

        let board = BoardState::new().make_move(5).unwrap();
        assert_eq!(encode(&board).as_str(), ".....X...");
    }

    #[test]
    fn test_encode_ignores_player_to_move() {
        let x_first = BoardState::new_with_player(Player::X);
        let o_first = BoardState::new_with_player(Player::O);
        assert_eq!(encode(&x_first), encode(&o_first));
    }

    #[test]
    fn test_no_symmetry_reduction() {
        let corner = BoardState::new().make_move(0).unwrap();
        let other_corner = BoardState::new().make_move(2).unwrap();
        assert_ne!(encode(&corner), encode(&other_corner));
    }

    #[test]
    fn test_distinct_boards_distinct_keys() {
        // Every board reachable in two plies maps to its own key.
        let mut keys = HashSet::new();
        let root = BoardState::new();
        for first in 0..9 {
            let one = root.make_move(first).unwrap();
            for second in one.legal_moves() {
                let two = one.make_move(second).unwrap();
                assert!(keys.insert(encode(&two)));
            }
        }
        assert_eq!(keys.len(), 72);
    }

    #[test]
    fn test_parse_validates() {
        assert_eq!(StateKey::parse("X...O....").unwrap().as_str(), "X...O....");
        assert_eq!(StateKey::parse("x-.......").unwrap().as_str(), "X........");
        assert!(StateKey::parse("X...O...").is_err());
        assert!(StateKey::parse("X...O.....").is_err());
        assert!(StateKey::parse("X...Q....").is_err());
    }
}
