//! Repeated games between the agent and one opponent

use serde::{Deserialize, Serialize};

use super::session::GameSession;
use crate::{
    Result,
    ports::{Learner, Observer},
    tictactoe::{GameOutcome, Player},
};

/// How a run of games is set up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub num_games: usize,
    /// Seeds the agent with `seed` and the opponent with `seed + 1`
    pub seed: Option<u64>,
    pub agent_player: Player,
    pub first_player: Player,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 1000,
            seed: None,
            agent_player: Player::O,
            first_player: Player::X,
        }
    }
}

/// Running win/draw/loss count seen from one player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeTally {
    side: Player,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl OutcomeTally {
    pub fn new(side: Player) -> Self {
        Self {
            side,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::Win(winner) if winner == self.side => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }
}

/// Summary of a finished run; rates are 0.0 when no games were played
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl From<OutcomeTally> for TrainingResult {
    fn from(tally: OutcomeTally) -> Self {
        let total_games = tally.games();
        let share = |count: usize| match total_games {
            0 => 0.0,
            n => count as f64 / n as f64,
        };
        Self {
            total_games,
            wins: tally.wins,
            draws: tally.draws,
            losses: tally.losses,
            win_rate: share(tally.wins),
            draw_rate: share(tally.draws),
            loss_rate: share(tally.losses),
        }
    }
}

/// Plays `num_games` sessions in a row, reporting to the attached observers
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn run(
        &mut self,
        agent: &mut dyn Learner,
        opponent: &mut dyn Learner,
    ) -> Result<TrainingResult> {
        let TrainingConfig {
            num_games,
            seed,
            agent_player,
            first_player,
        } = self.config;

        if let Some(seed) = seed {
            agent.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }

        self.observers
            .iter_mut()
            .try_for_each(|observer| observer.on_training_start(num_games))?;

        let session = GameSession::new(agent_player, first_player);
        let mut tally = OutcomeTally::new(agent_player);
        for game_num in 0..num_games {
            let (_, outcome) = session.play(game_num, agent, opponent, &mut self.observers)?;
            tally.record(outcome);
        }

        self.observers
            .iter_mut()
            .try_for_each(|observer| observer.on_training_end())?;

        Ok(tally.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::learners::{DefensiveLearner, RandomLearner};

    #[test]
    fn test_tally_counts_from_its_side() {
        let mut tally = OutcomeTally::new(Player::O);
        tally.record(GameOutcome::Win(Player::O));
        tally.record(GameOutcome::Win(Player::O));
        tally.record(GameOutcome::Win(Player::X));
        tally.record(GameOutcome::Draw);

        assert_eq!((tally.wins, tally.draws, tally.losses), (2, 1, 1));

        let result = TrainingResult::from(tally);
        assert_eq!(result.total_games, 4);
        assert_eq!(result.win_rate, 0.5);
        assert_eq!(result.draw_rate, 0.25);
        assert_eq!(result.loss_rate, 0.25);
    }

    #[test]
    fn test_empty_run_has_zero_rates() {
        let result = TrainingResult::from(OutcomeTally::new(Player::X));
        assert_eq!(result.total_games, 0);
        assert_eq!(result.win_rate, 0.0);
        assert_eq!(result.loss_rate, 0.0);
    }

    #[test]
    fn test_run_plays_every_game() {
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            num_games: 25,
            seed: Some(3),
            ..TrainingConfig::default()
        });
        let mut agent = RandomLearner::new("Agent".to_string());
        let mut opponent = DefensiveLearner::new("Opponent".to_string());

        let result = pipeline.run(&mut agent, &mut opponent).unwrap();
        assert_eq!(result.total_games, 25);
        assert_eq!(result.wins + result.draws + result.losses, 25);
    }
}
