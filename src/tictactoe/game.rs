//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a finished board, or `None` while play continues.
    pub fn from_state(state: &BoardState) -> Option<Self> {
        if let Some(winner) = state.winner() {
            Some(GameOutcome::Win(winner))
        } else if state.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
    current: BoardState,
}

impl Game {
    /// Create a new game with X to move
    pub fn new() -> Self {
        Self::starting_with(Player::X)
    }

    /// Create a new game where `first_player` opens
    pub fn starting_with(first_player: Player) -> Self {
        let initial = BoardState::new_with_player(first_player);
        Game {
            initial,
            moves: Vec::new(),
            outcome: None,
            current: initial,
        }
    }

    /// Play a move for the player whose turn it is
    pub fn play(&mut self, position: usize) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let next = self.current.make_move(position)?;
        self.moves.push(Move {
            position,
            player: self.current.to_move,
        });
        self.current = next;
        self.outcome = GameOutcome::from_state(&next);

        Ok(())
    }

    /// Get current board state
    pub fn current_state(&self) -> &BoardState {
        &self.current
    }

    /// Check whether the game has finished
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Move positions in play order
    pub fn positions(&self) -> Vec<usize> {
        self.moves.iter().map(|m| m.position).collect()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_records_moves_and_outcome() {
        let mut game = Game::new();
        for pos in [0, 3, 1, 4, 2] {
            game.play(pos).unwrap();
        }

        assert!(game.is_over());
        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
        assert_eq!(game.positions(), vec![0, 3, 1, 4, 2]);
        assert_eq!(game.moves[1].player, Player::O);
    }

    #[test]
    fn test_play_after_game_over_fails() {
        let mut game = Game::new();
        for pos in [0, 3, 1, 4, 2] {
            game.play(pos).unwrap();
        }
        assert!(matches!(game.play(8), Err(crate::Error::GameOver)));
    }

    #[test]
    fn test_illegal_move_leaves_game_unchanged() {
        let mut game = Game::starting_with(Player::O);
        game.play(4).unwrap();
        assert!(game.play(4).is_err());
        assert_eq!(game.moves.len(), 1);
        assert_eq!(game.current_state().to_move, Player::X);
    }

    #[test]
    fn test_draw_outcome() {
        let mut game = Game::new();
        for pos in [0, 1, 2, 4, 3, 6, 5, 8, 7] {
            game.play(pos).unwrap();
        }
        assert_eq!(game.outcome, Some(GameOutcome::Draw));
    }
}
