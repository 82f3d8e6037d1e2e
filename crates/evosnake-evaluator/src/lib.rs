//! Evaluator system for scoring snake states and playing whole episodes.
//!
//! This crate implements a three-level evaluation architecture:
//!
//! 1. **State Evaluation** ([`state_evaluator`]) - Scores a single [`GameState`] as a
//!    weighted sum of hand-written features ([`feature`]).
//!
//! 2. **Turn Evaluation** ([`turn_evaluator`]) - Picks the move for the current turn with a
//!    bounded-depth lookahead that maximizes the state score.
//!
//! 3. **Episode Evaluation** ([`episode`]) - Plays a complete game and turns the result into
//!    a fitness value for the genetic algorithm.
//!
//! # Architecture
//!
//! ```text
//! Episode Evaluation (fitness for training)
//!     ↓ uses
//! Turn Evaluation (lookahead search)
//!     ↓ uses
//! State Evaluation (weighted features)
//! ```
//!
//! # Example
//!
//! ```
//! use evosnake_engine::GridSize;
//! use evosnake_evaluator::{
//!     episode::{EpisodeRunner, NoopObserver},
//!     feature::Feature,
//!     turn_evaluator::TurnEvaluator,
//!     weights::FeatureWeights,
//! };
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! // Prefer staying close to the food.
//! let mut weights = FeatureWeights::zeros();
//! weights[Feature::DistanceToFood] = -1.0;
//!
//! let turn_evaluator = TurnEvaluator::new(Box::new(weights), 2);
//! let runner = EpisodeRunner::new(GridSize::default(), 200);
//! let summary = runner.play(&turn_evaluator, &mut Pcg32::seed_from_u64(3), &mut NoopObserver);
//!
//! assert!(summary.turns() <= 200);
//! ```
//!
//! [`GameState`]: evosnake_engine::GameState

pub mod episode;
pub mod feature;
pub mod state_evaluator;
pub mod turn_evaluator;
pub mod weights;
