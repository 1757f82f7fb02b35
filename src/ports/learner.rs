//! Anything that can take a turn: the Q-learning agent, scripted opponents
//! and the console player.

use crate::{
    Result,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// A participant the game driver can ask for moves.
///
/// ```no_run
/// use tictactoe_q::{ports::Learner, tictactoe::BoardState};
///
/// fn opening_move<L: Learner>(player: &mut L) -> tictactoe_q::Result<usize> {
///     player.select_move(&BoardState::new())
/// }
/// ```
pub trait Learner: Send {
    /// Called before the first move of every game.
    fn begin_game(&mut self, _role: Player) -> Result<()> {
        Ok(())
    }

    /// Pick a cell for `state.to_move`.
    ///
    /// # Errors
    ///
    /// Fails on a finished board or when the move source (e.g. stdin) fails.
    fn select_move(&mut self, state: &BoardState) -> Result<usize>;

    /// Told once per game how it ended and which side this learner played.
    /// Fixed policies ignore it.
    fn learn(&mut self, _outcome: GameOutcome, _role: Player) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    /// Reseed any internal randomness; used for reproducible runs.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
