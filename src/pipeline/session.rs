//! A single game between the agent and one opponent

use crate::{
    Result,
    ports::{Learner, Observer},
    tictactoe::{Game, GameOutcome, Player},
};

/// Turn sequencing for one game
///
/// Alternates between the two learners starting with `first_player`, records
/// every move in a [`Game`], and feeds the outcome to both learners exactly once.
#[derive(Debug, Clone, Copy)]
pub struct GameSession {
    agent_player: Player,
    first_player: Player,
}

impl GameSession {
    pub fn new(agent_player: Player, first_player: Player) -> Self {
        Self {
            agent_player,
            first_player,
        }
    }

    /// Play one game to completion and return it with its outcome set.
    pub fn play(
        &self,
        game_num: usize,
        agent: &mut dyn Learner,
        opponent: &mut dyn Learner,
        observers: &mut [Box<dyn Observer>],
    ) -> Result<(Game, GameOutcome)> {
        agent.begin_game(self.agent_player)?;
        opponent.begin_game(self.agent_player.opponent())?;

        let mut game = Game::starting_with(self.first_player);
        for observer in observers.iter_mut() {
            observer.on_game_start(game_num, game.current_state())?;
        }

        let mut step_num = 0;
        let outcome = loop {
            if let Some(outcome) = game.outcome {
                break outcome;
            }

            let state = *game.current_state();
            let mover = state.to_move;
            let learner: &mut dyn Learner = if mover == self.agent_player {
                &mut *agent
            } else {
                &mut *opponent
            };

            let move_pos = learner.select_move(&state)?;
            game.play(move_pos)?;

            for observer in observers.iter_mut() {
                observer.on_move(game_num, step_num, mover, move_pos, game.current_state())?;
            }
            step_num += 1;
        };

        agent.learn(outcome, self.agent_player)?;
        opponent.learn(outcome, self.agent_player.opponent())?;

        for observer in observers.iter_mut() {
            observer.on_game_end(game_num, game.current_state(), outcome)?;
        }

        Ok((game, outcome))
    }
}
