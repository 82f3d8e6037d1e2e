//! Training system for evolving snake policies with a genetic algorithm.
//!
//! A policy is a [`Genome`](genome::Genome): one weight per heuristic feature of
//! `evosnake-evaluator`. The genetic algorithm plays one episode per genome, keeps the
//! better half, and breeds a new population from it.
//!
//! # How Training Works
//!
//! 1. **Population** - Create genomes with uniformly random weights
//! 2. **Evaluation** - Each genome plays one episode; fitness is `score * 1000 + turns`
//! 3. **Archiving** - The sorted population is appended to the archive
//! 4. **Selection** - The top half (the elites) form a roulette wheel weighted by fitness
//! 5. **Reproduction** - Each child takes every gene from one of two roulette-drawn parents
//!    and occasionally mutates it
//! 6. **Repeat** - The caller decides how many generations to run
//!
//! # Architecture
//!
//! ```text
//! Evolution (genetic)
//!     ↓ evolves
//! Genome (weights + id + fitness)
//!     ↓ plays episodes with
//! TurnEvaluator / EpisodeRunner (evosnake-evaluator)
//!     ↓ produces
//! Fitness
//!     ↓ guides
//! RouletteWheel (selection) & weight operators (weights)
//! ```
//!
//! Genomes are persisted as plain text records by the [`record`] module.
//!
//! # Example
//!
//! ```
//! use evosnake_training::genetic::{Evolution, EvolutionParams};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64;
//!
//! let mut rng = Pcg64::seed_from_u64(5);
//! let params = EvolutionParams {
//!     population_size: 4,
//!     ..EvolutionParams::default()
//! };
//! let mut evolution = Evolution::initialize(params, &mut rng).unwrap();
//!
//! for _ in 0..2 {
//!     evolution.evaluate_generation(100, &mut rng);
//!     evolution.spawn_next_generation(&mut rng);
//! }
//! evolution.evaluate_generation(100, &mut rng);
//!
//! assert_eq!(evolution.generation(), 2);
//! assert_eq!(evolution.archive().len(), 2);
//! let best = evolution.best().unwrap();
//! assert!(evolution.population().iter().all(|g| g.fitness() <= best.fitness()));
//! ```

pub mod genetic;
pub mod genome;
pub mod record;
pub mod selection;
pub mod statistics;
pub mod weights;
