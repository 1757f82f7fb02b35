//! Learner adapters: the Q-learning agent and scripted opponents

use log::debug;
use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    app::RewardScheme,
    ports::Learner,
    q_learning::QLearningAgent,
    tictactoe::{BoardState, GameOutcome, LineAnalyzer, Player},
    types::encode,
};

/// Q-learning agent wrapper
///
/// Encodes each board into a state key, hands the legal moves to the agent,
/// and converts the final outcome into a reward through its [`RewardScheme`].
pub struct QLearner {
    agent: QLearningAgent,
    rewards: RewardScheme,
    name: String,
}

impl QLearner {
    /// Create from an existing agent
    pub fn new(agent: QLearningAgent, rewards: RewardScheme, name: String) -> Self {
        Self {
            agent,
            rewards,
            name,
        }
    }

    /// Get reference to underlying agent
    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn into_agent(self) -> QLearningAgent {
        self.agent
    }
}

impl Learner for QLearner {
    fn begin_game(&mut self, _role: Player) -> Result<()> {
        self.agent.begin_episode();
        Ok(())
    }

    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        let legal_moves = state.legal_moves();
        if legal_moves.is_empty() {
            return Err(Error::NoValidMoves);
        }
        Ok(self.agent.select_move(&encode(state), &legal_moves))
    }

    fn learn(&mut self, outcome: GameOutcome, role: Player) -> Result<()> {
        let reward = self.rewards.reward_for(outcome, role);
        let updated = self.agent.propagate_outcome(reward);
        debug!("{}: propagated reward {reward} over {updated} moves", self.name);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.agent.set_rng_seed(seed);
        Ok(())
    }
}

fn random_empty_cell(state: &BoardState, rng: &mut StdRng) -> Result<usize> {
    let moves = state.legal_moves();
    if moves.is_empty() {
        return Err(Error::NoValidMoves);
    }
    let index = rng.random_range(0..moves.len());
    Ok(moves[index])
}

/// Random policy learner (uniform over empty cells)
pub struct RandomLearner {
    name: String,
    rng: StdRng,
}

impl RandomLearner {
    /// Create a new random learner
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random learner with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Learner for RandomLearner {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        random_empty_cell(state, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Defensive policy learner
///
/// 1. Completes its own line if it can win immediately
/// 2. Otherwise blocks an opponent line that would win next turn
/// 3. Otherwise plays randomly
pub struct DefensiveLearner {
    name: String,
    rng: StdRng,
}

impl DefensiveLearner {
    /// Create a new defensive learner
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a defensive learner with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Learner for DefensiveLearner {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        if state.is_terminal() {
            return Err(Error::NoValidMoves);
        }

        let me = state.to_move;
        if let Some(&win) = LineAnalyzer::winning_moves(&state.cells, me).first() {
            return Ok(win);
        }
        if let Some(&block) = LineAnalyzer::winning_moves(&state.cells, me.opponent()).first() {
            return Ok(block);
        }
        random_empty_cell(state, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::Hyperparameters;

    #[test]
    fn test_random_learner_picks_empty_cell() {
        let mut learner = RandomLearner::with_seed("Random".to_string(), 5);
        let state = BoardState::from_string("XO.XO....").unwrap();
        for _ in 0..50 {
            let pos = learner.select_move(&state).unwrap();
            assert!(state.is_empty(pos));
        }
    }

    #[test]
    fn test_random_learner_rejects_finished_board() {
        let mut learner = RandomLearner::with_seed("Random".to_string(), 5);
        let state = BoardState::from_string("XXXOO....").unwrap();
        assert!(matches!(
            learner.select_move(&state),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_defensive_learner_takes_win_before_block() {
        // X to move; X wins at 2, O threatens at 5
        let state = BoardState::from_string("XX.OO....").unwrap();
        let mut learner = DefensiveLearner::with_seed("Defensive".to_string(), 1);
        assert_eq!(learner.select_move(&state).unwrap(), 2);
    }

    #[test]
    fn test_defensive_learner_blocks() {
        // O to move; X threatens the top row
        let state = BoardState::from_string("XX..O....").unwrap();
        let mut learner = DefensiveLearner::with_seed("Defensive".to_string(), 1);
        assert_eq!(learner.select_move(&state).unwrap(), 2);
    }

    #[test]
    fn test_q_learner_learns_from_outcome() {
        let agent = QLearningAgent::new(Hyperparameters::new(0.5, 0.9, 0.0)).with_seed(3);
        let mut learner = QLearner::new(agent, RewardScheme::default(), "Q".to_string());

        let state = BoardState::from_string("X........").unwrap();
        let pos = learner.select_move(&state).unwrap();
        assert_eq!(pos, 1);

        learner
            .learn(GameOutcome::Win(Player::X), Player::O)
            .unwrap();
        let value = learner.agent().table().get(&encode(&state), pos);
        assert_eq!(value, -0.5);
        assert!(learner.agent().trace().is_empty());
    }
}
