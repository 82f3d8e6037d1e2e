//! Episode evaluation: playing a whole game and scoring it.
//!
//! This is the third level of the evaluator architecture. An [`EpisodeRunner`] starts a
//! fresh game, lets a [`TurnEvaluator`] choose every move, and stops when the game ends
//! or the turn limit is reached. The outcome is condensed into a single fitness value:
//!
//! ```text
//! fitness = score * 1000 + turns
//! ```
//!
//! Eating always outweighs survival time for any realistic turn limit, and among equal
//! scores the longer-lived policy wins.

use evosnake_engine::{GameState, GameStatus, GridSize};
use rand::Rng;

use crate::turn_evaluator::TurnEvaluator;

/// Fitness awarded per food eaten.
pub const SCORE_WEIGHT: u64 = 1000;
/// Fitness awarded per turn survived.
pub const TURN_WEIGHT: u64 = 1;

/// Combines an episode's score and turn count into a fitness value.
#[must_use]
pub fn fitness(score: u32, turns: u32) -> u64 {
    u64::from(score) * SCORE_WEIGHT + u64::from(turns) * TURN_WEIGHT
}

/// Receives every state of an episode as it is played.
///
/// Observers see the initial state and the state after each transition. They cannot
/// influence the game.
pub trait EpisodeObserver {
    fn observe(&mut self, state: &GameState);
}

/// Observer that ignores every state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl EpisodeObserver for NoopObserver {
    fn observe(&mut self, _state: &GameState) {}
}

/// Result of a single episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeSummary {
    score: u32,
    turns: u32,
    status: GameStatus,
    fitness: u64,
}

impl EpisodeSummary {
    #[must_use]
    pub fn from_final_state(state: &GameState) -> Self {
        Self {
            score: state.score(),
            turns: state.turn(),
            status: state.status(),
            fitness: fitness(state.score(), state.turn()),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Final status; [`GameStatus::Playing`] means the turn limit was reached.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn fitness(&self) -> u64 {
        self.fitness
    }
}

/// Plays episodes on a fixed grid with a fixed turn limit.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeRunner {
    grid: GridSize,
    turn_limit: u32,
}

impl EpisodeRunner {
    #[must_use]
    pub fn new(grid: GridSize, turn_limit: u32) -> Self {
        Self { grid, turn_limit }
    }

    /// Plays one episode from the initial state.
    ///
    /// At most `turn_limit` transitions are made. All randomness (food placement and
    /// tie-breaking) is drawn from `rng`.
    pub fn play<R>(
        &self,
        turn_evaluator: &TurnEvaluator<'_>,
        rng: &mut R,
        observer: &mut dyn EpisodeObserver,
    ) -> EpisodeSummary
    where
        R: Rng + ?Sized,
    {
        let mut state = GameState::new(self.grid, rng);
        observer.observe(&state);

        while state.turn() < self.turn_limit {
            let Some(action) = turn_evaluator.select_action(&state, rng) else {
                break;
            };
            let Ok(next) = state.transition(action, rng) else {
                break;
            };
            state = next;
            observer.observe(&state);
        }

        EpisodeSummary::from_final_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{feature::Feature, turn_evaluator::DEFAULT_DEPTH, weights::FeatureWeights};

    #[derive(Debug, Default)]
    struct Recorder {
        turns: Vec<u32>,
    }

    impl EpisodeObserver for Recorder {
        fn observe(&mut self, state: &GameState) {
            self.turns.push(state.turn());
        }
    }

    fn food_seeker() -> FeatureWeights {
        let mut weights = FeatureWeights::zeros();
        weights[Feature::DistanceToFood] = -1.0;
        weights[Feature::Score] = 1.0;
        weights
    }

    #[test]
    fn test_fitness_formula() {
        assert_eq!(fitness(0, 0), 0);
        assert_eq!(fitness(3, 250), 3250);
        assert_eq!(fitness(1, 999), 1999);
    }

    #[test]
    fn test_turn_limit_zero_plays_nothing() {
        let runner = EpisodeRunner::new(GridSize::default(), 0);
        let evaluator = TurnEvaluator::new(Box::new(food_seeker()), DEFAULT_DEPTH);
        let mut recorder = Recorder::default();
        let summary = runner.play(&evaluator, &mut Pcg32::seed_from_u64(0), &mut recorder);
        assert_eq!(summary.turns(), 0);
        assert_eq!(summary.score(), 0);
        assert_eq!(summary.fitness(), 0);
        assert_eq!(summary.status(), GameStatus::Playing);
        assert_eq!(recorder.turns, [0]);
    }

    #[test]
    fn test_observer_sees_every_state() {
        let runner = EpisodeRunner::new(GridSize::default(), 50);
        let evaluator = TurnEvaluator::new(Box::new(food_seeker()), DEFAULT_DEPTH);
        let mut recorder = Recorder::default();
        let summary = runner.play(&evaluator, &mut Pcg32::seed_from_u64(7), &mut recorder);
        let expected: Vec<u32> = (0..=summary.turns()).collect();
        assert_eq!(recorder.turns, expected);
        assert!(summary.turns() <= 50);
        assert_eq!(summary.fitness(), fitness(summary.score(), summary.turns()));
    }

    #[test]
    fn test_same_seed_same_summary() {
        let runner = EpisodeRunner::new(GridSize::default(), 300);
        let evaluator = TurnEvaluator::new(Box::new(food_seeker()), DEFAULT_DEPTH);
        let a = runner.play(&evaluator, &mut Pcg32::seed_from_u64(11), &mut NoopObserver);
        let b = runner.play(&evaluator, &mut Pcg32::seed_from_u64(11), &mut NoopObserver);
        assert_eq!(a, b);
    }

    #[test]
    fn test_food_seeker_scores() {
        let runner = EpisodeRunner::new(GridSize::default(), 500);
        let evaluator = TurnEvaluator::new(Box::new(food_seeker()), DEFAULT_DEPTH);
        let summary = runner.play(&evaluator, &mut Pcg32::seed_from_u64(1), &mut NoopObserver);
        assert!(summary.score() > 0);
    }
}
