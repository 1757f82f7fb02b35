//! Observer implementations for training runs

use indicatif::{ProgressBar, ProgressStyle};

use super::training::OutcomeTally;
use crate::{
    Result,
    ports::Observer,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// Progress bar observer with a running win/draw/loss tally for the agent
pub struct ProgressObserver {
    tally: OutcomeTally,
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new(agent_player: Player) -> Self {
        Self {
            tally: OutcomeTally::new(agent_player),
            progress_bar: None,
        }
    }

    fn message(&self) -> String {
        format!(
            "W:{} D:{} L:{}",
            self.tally.wins, self.tally.draws, self.tally.losses
        )
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let style = ProgressStyle::with_template(
            "{spinner} {wide_bar} {pos}/{len} games, {msg} [{elapsed}]",
        )
        .map_err(|e| crate::Error::ProgressBarTemplate {
            message: e.to_string(),
        })?;
        let bar = ProgressBar::new(total_games as u64).with_style(style);
        bar.set_message(self.message());
        self.progress_bar = Some(bar);
        Ok(())
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        _state: &BoardState,
        outcome: GameOutcome,
    ) -> Result<()> {
        self.tally.record(outcome);

        if let Some(bar) = &self.progress_bar {
            bar.set_position(game_num as u64 + 1);
            bar.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(bar) = self.progress_bar.take() {
            bar.finish_with_message(self.message());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_observer_tallies_from_agent_perspective() {
        let mut observer = ProgressObserver::new(Player::O);
        let board = BoardState::new();
        observer
            .on_game_end(0, &board, GameOutcome::Win(Player::O))
            .unwrap();
        observer
            .on_game_end(1, &board, GameOutcome::Win(Player::X))
            .unwrap();
        observer.on_game_end(2, &board, GameOutcome::Draw).unwrap();

        assert_eq!(observer.message(), "W:1 D:1 L:1");
    }
}
