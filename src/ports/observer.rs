//! Hooks for watching games without the driver knowing who is watching

use crate::{
    Result,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// Receives driver events; every hook defaults to doing nothing.
///
/// A training run calls `on_training_start` once, then for each game
/// `on_game_start`, `on_move` per placed marker and `on_game_end`, and
/// finally `on_training_end`. A single interactive game only fires the
/// per-game hooks.
pub trait Observer: Send {
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// `state` is the empty opening board with the first player to move.
    fn on_game_start(&mut self, _game_num: usize, _state: &BoardState) -> Result<()> {
        Ok(())
    }

    /// `player` put a marker on `move_pos`; `state` is the board afterwards and
    /// `step_num` counts plies from 0.
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _player: Player,
        _move_pos: usize,
        _state: &BoardState,
    ) -> Result<()> {
        Ok(())
    }

    /// Fired after both learners have seen the outcome.
    fn on_game_end(
        &mut self,
        _game_num: usize,
        _state: &BoardState,
        _outcome: GameOutcome,
    ) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
