//! Genetic algorithm controller.
//!
//! [`Evolution`] owns the current population, the archive of past populations, and the
//! id counter. The caller drives it one generation at a time:
//!
//! ```text
//! initialize → evaluate_generation → spawn_next_generation → evaluate_generation → ...
//! ```
//!
//! # Generation step
//!
//! 1. **Evaluate** - every genome plays one episode, then the population is stable-sorted
//!    by ascending fitness (the best genome is last)
//! 2. **Archive** - the sorted population is appended to the archive
//! 3. **Elites** - the top half (`size - size / 2` genomes, at least one) is kept as the
//!    parent pool
//! 4. **Roulette** - parents are drawn with probability proportional to fitness
//! 5. **Breed** - each child draws two parents (with replacement), takes every gene from
//!    one of them, then mutates; it receives a fresh id and zero fitness
//!
//! Elites themselves are not carried over unchanged; every slot of the next population is
//! a new child.
//!
//! # Randomness
//!
//! All randomness comes from the generator passed in, consumed in a fixed order: episode
//! evaluation in population order, then per child the two parent draws, crossover in gene
//! order, and mutation in gene order. A seeded generator therefore reproduces the run.
//!
//! [`Evolution::evaluate_generation_parallel`] plays episodes on scoped threads instead.
//! It draws one seed per genome up front, so it is just as reproducible, but produces
//! different fitness values than the serial version for the same seed.

use std::thread;

use derive_more::{Display, Error};
use evosnake_engine::GridSize;
use evosnake_evaluator::{
    episode::{EpisodeRunner, NoopObserver},
    state_evaluator,
    turn_evaluator::DEFAULT_DEPTH,
};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    genome::{Genome, GenomeId},
    selection::RouletteWheel,
    statistics::GenerationStats,
    weights,
};

/// Tunable parameters of the genetic algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Number of genomes per generation
    pub population_size: usize,
    /// Probability of mutating each gene of a child
    pub mutation_chance: f32,
    /// Largest change a single mutation can make to a gene
    pub mutation_step: f32,
    /// Initial weights are drawn from `[-bound, bound)`
    pub initial_weight_bound: f32,
    /// Plies searched by the turn evaluator
    pub lookahead_depth: usize,
    /// Board every episode is played on
    pub grid: GridSize,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 30,
            mutation_chance: 0.05,
            mutation_step: 0.2,
            initial_weight_bound: 0.5,
            lookahead_depth: DEFAULT_DEPTH,
            grid: GridSize::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Display, Error)]
pub enum ParamsError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("mutation chance must be within [0, 1], got {_0}")]
    MutationChance(#[error(not(source))] f32),
    #[display("mutation step must be finite and non-negative, got {_0}")]
    MutationStep(#[error(not(source))] f32),
    #[display("initial weight bound must be finite and positive, got {_0}")]
    InitialWeightBound(#[error(not(source))] f32),
    #[display("lookahead depth must be at least 1")]
    ZeroDepth,
    #[display(
        "grid {width}x{height} is too small for the loss penalty to outweigh every other feature"
    )]
    GridTooSmall { width: i32, height: i32 },
}

impl EvolutionParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.population_size == 0 {
            return Err(ParamsError::EmptyPopulation);
        }
        if !(0.0..=1.0).contains(&self.mutation_chance) {
            return Err(ParamsError::MutationChance(self.mutation_chance));
        }
        if !self.mutation_step.is_finite() || self.mutation_step < 0.0 {
            return Err(ParamsError::MutationStep(self.mutation_step));
        }
        if !self.initial_weight_bound.is_finite() || self.initial_weight_bound <= 0.0 {
            return Err(ParamsError::InitialWeightBound(self.initial_weight_bound));
        }
        if self.lookahead_depth == 0 {
            return Err(ParamsError::ZeroDepth);
        }
        if !state_evaluator::penalty_dominates(&self.grid) {
            return Err(ParamsError::GridTooSmall {
                width: self.grid.width(),
                height: self.grid.height(),
            });
        }
        Ok(())
    }

    /// Number of top genomes that become parents: the upper half, rounded up.
    #[must_use]
    pub fn elite_count(&self) -> usize {
        self.population_size - self.population_size / 2
    }
}

/// Population, archive, and counters of one evolution run.
#[derive(Debug, Clone)]
pub struct Evolution {
    params: EvolutionParams,
    population: Vec<Genome>,
    archive: Vec<Vec<Genome>>,
    generation: usize,
    next_genome_id: u64,
}

impl Evolution {
    /// Creates generation 0 with random weights and fresh ids.
    pub fn initialize<R>(params: EvolutionParams, rng: &mut R) -> Result<Self, ParamsError>
    where
        R: Rng + ?Sized,
    {
        params.validate()?;
        let mut this = Self {
            params,
            population: Vec::with_capacity(params.population_size),
            archive: vec![],
            generation: 0,
            next_genome_id: 0,
        };
        for _ in 0..params.population_size {
            let id = this.fresh_id();
            let genome = Genome::random(id, params.initial_weight_bound, rng);
            this.population.push(genome);
        }
        log::debug!(
            "initialized population of {} genomes",
            params.population_size
        );
        Ok(this)
    }

    /// Current population; sorted by ascending fitness after evaluation.
    #[must_use]
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Past populations, oldest first, one per completed generation.
    #[must_use]
    pub fn archive(&self) -> &[Vec<Genome>] {
        &self.archive
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best genome of the current population (valid after evaluation).
    #[must_use]
    pub fn best(&self) -> Option<&Genome> {
        self.population.last()
    }

    /// Best genome across every archived population.
    #[must_use]
    pub fn best_archived(&self) -> Option<&Genome> {
        self.archive.iter().flatten().max_by_key(|g| g.fitness())
    }

    /// Fitness statistics of the current population.
    #[must_use]
    pub fn statistics(&self) -> Option<GenerationStats> {
        GenerationStats::new(
            self.generation,
            self.population.iter().map(Genome::fitness),
        )
    }

    fn runner(&self, turn_limit: u32) -> EpisodeRunner {
        EpisodeRunner::new(self.params.grid, turn_limit)
    }

    /// Plays one episode per genome in population order, then sorts by fitness.
    pub fn evaluate_generation<R>(&mut self, turn_limit: u32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let runner = self.runner(turn_limit);
        let depth = self.params.lookahead_depth;
        for genome in &mut self.population {
            let summary = genome.run_episode(&runner, depth, rng, &mut NoopObserver);
            log::debug!(
                "genome {}: score={} turns={} status={:?} fitness={}",
                genome.id(),
                summary.score(),
                summary.turns(),
                summary.status(),
                summary.fitness(),
            );
        }
        self.finish_evaluation();
    }

    /// Like [`Evolution::evaluate_generation`], but plays the episodes in parallel.
    ///
    /// One seed per genome is drawn from `rng` in population order; each episode then
    /// runs on its own generator.
    pub fn evaluate_generation_parallel<R>(&mut self, turn_limit: u32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let runner = self.runner(turn_limit);
        let depth = self.params.lookahead_depth;
        let seeds: Vec<u64> = self.population.iter().map(|_| rng.random()).collect();

        thread::scope(|s| {
            for (genome, seed) in self.population.iter_mut().zip(seeds) {
                s.spawn(move || {
                    let mut rng = Pcg32::seed_from_u64(seed);
                    let summary = genome.run_episode(&runner, depth, &mut rng, &mut NoopObserver);
                    log::debug!(
                        "genome {}: score={} turns={} fitness={}",
                        genome.id(),
                        summary.score(),
                        summary.turns(),
                        summary.fitness(),
                    );
                });
            }
        });
        self.finish_evaluation();
    }

    fn finish_evaluation(&mut self) {
        // stable: equal fitness keeps evaluation order
        self.population.sort_by_key(Genome::fitness);
        if let Some(stats) = self.statistics() {
            log::info!(
                "generation {}: best={} median={} mean={:.1} worst={}",
                stats.generation,
                stats.max,
                stats.median,
                stats.mean,
                stats.min,
            );
        }
    }

    /// Archives the current population and replaces it with bred children.
    pub fn spawn_next_generation<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.population.sort_by_key(Genome::fitness);
        let elite_count = self.params.elite_count().min(self.population.len());
        let elites = self.population[self.population.len() - elite_count..].to_vec();
        let Some(wheel) = RouletteWheel::new(elites.iter().map(Genome::fitness)) else {
            return;
        };

        let mut children = Vec::with_capacity(self.params.population_size);
        for _ in 0..self.params.population_size {
            let a = &elites[wheel.select(rng)];
            let b = &elites[wheel.select(rng)];
            let mut child = weights::uniform_crossover(a.weights(), b.weights(), rng);
            weights::mutate(
                &mut child,
                self.params.mutation_chance,
                self.params.mutation_step,
                rng,
            );
            children.push(Genome::new(self.fresh_id(), child));
        }

        self.archive
            .push(std::mem::replace(&mut self.population, children));
        self.generation += 1;
        log::debug!(
            "spawned generation {} from {} elites",
            self.generation,
            elites.len()
        );
    }

    fn fresh_id(&mut self) -> GenomeId {
        let id = GenomeId::new(self.next_genome_id);
        self.next_genome_id += 1;
        id
    }
}
