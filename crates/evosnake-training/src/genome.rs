//! Genomes: the individuals of the genetic algorithm.

use std::fmt;

use evosnake_engine::{Direction, GameState};
use evosnake_evaluator::{
    episode::{EpisodeObserver, EpisodeRunner, EpisodeSummary},
    state_evaluator::StateEvaluator as _,
    turn_evaluator::TurnEvaluator,
    weights::FeatureWeights,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::weights;

/// Identifier of a genome, unique within one evolution run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct GenomeId(u64);

impl GenomeId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A candidate policy: one weight per feature, plus identity and the latest fitness.
///
/// Fitness starts at 0 and is overwritten every time the genome plays an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    id: GenomeId,
    weights: FeatureWeights,
    fitness: u64,
}

impl Genome {
    #[must_use]
    pub fn new(id: GenomeId, weights: FeatureWeights) -> Self {
        Self::from_parts(id, weights, 0)
    }

    #[must_use]
    pub fn from_parts(id: GenomeId, weights: FeatureWeights, fitness: u64) -> Self {
        Self {
            id,
            weights,
            fitness,
        }
    }

    /// Creates a genome whose weights are drawn uniformly from `[-bound, bound)`.
    pub fn random<R>(id: GenomeId, bound: f32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(id, weights::random(rng, bound))
    }

    #[must_use]
    pub fn id(&self) -> GenomeId {
        self.id
    }

    #[must_use]
    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    #[must_use]
    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    /// Scores `state` with this genome's weights.
    #[must_use]
    pub fn heuristic(&self, state: &GameState) -> f32 {
        self.weights.evaluate_state(state)
    }

    /// Builds a turn evaluator that searches `depth` plies with this genome's weights.
    #[must_use]
    pub fn turn_evaluator(&self, depth: usize) -> TurnEvaluator<'static> {
        TurnEvaluator::new(Box::new(self.weights), depth)
    }

    /// Chooses the next move from `state`, or `None` if the game is over.
    pub fn choose_action<R>(&self, state: &GameState, depth: usize, rng: &mut R) -> Option<Direction>
    where
        R: Rng + ?Sized,
    {
        self.turn_evaluator(depth).select_action(state, rng)
    }

    /// Plays one episode and records its fitness on this genome.
    pub fn run_episode<R>(
        &mut self,
        runner: &EpisodeRunner,
        depth: usize,
        rng: &mut R,
        observer: &mut dyn EpisodeObserver,
    ) -> EpisodeSummary
    where
        R: Rng + ?Sized,
    {
        let summary = runner.play(&self.turn_evaluator(depth), rng, observer);
        self.fitness = summary.fitness();
        summary
    }
}

/// Prints the id, one labelled line per gene, and the fitness.
impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Genome ID: {}", self.id)?;
        for (feature, weight) in self.weights.iter() {
            writeln!(f, "{feature}: {weight}")?;
        }
        write!(f, "Fitness: {}", self.fitness)
    }
}
