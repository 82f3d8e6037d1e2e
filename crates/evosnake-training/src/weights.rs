//! Weight vector operators for the genetic algorithm.
//!
//! - **Initialization**: [`random`] draws every weight uniformly from `[-bound, bound)`
//! - **Crossover**: [`uniform_crossover`] takes each gene from one parent or the other
//! - **Mutation**: [`mutate`] nudges individual genes by a bounded uniform step
//!
//! All operators consume the generator in gene order ([`Feature::ALL`]), so a seeded
//! generator reproduces the same offspring.
//!
//! [`Feature::ALL`]: evosnake_evaluator::feature::Feature::ALL

use evosnake_evaluator::weights::FeatureWeights;
use rand::Rng;

/// Generates weights drawn independently from `[-bound, bound)`.
///
/// A non-positive `bound` yields all-zero weights.
pub fn random<R>(rng: &mut R, bound: f32) -> FeatureWeights
where
    R: Rng + ?Sized,
{
    if bound <= 0.0 {
        return FeatureWeights::zeros();
    }
    FeatureWeights::from_fn(|_| rng.random_range(-bound..bound))
}

/// Builds a child by taking each gene from `a` or `b` with equal probability.
pub fn uniform_crossover<R>(a: &FeatureWeights, b: &FeatureWeights, rng: &mut R) -> FeatureWeights
where
    R: Rng + ?Sized,
{
    FeatureWeights::from_fn(|f| if rng.random_bool(0.5) { a[f] } else { b[f] })
}

/// Mutates weights in place.
///
/// Each gene is perturbed with probability `chance` by a value drawn from
/// `[-step, step]`. Genes are not clamped, so weights may drift outside the initial
/// range over many generations.
pub fn mutate<R>(weights: &mut FeatureWeights, chance: f32, step: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let chance = f64::from(chance.clamp(0.0, 1.0));
    let step = step.abs();
    for w in weights.as_mut_array() {
        if rng.random_bool(chance) {
            *w += rng.random_range(-step..=step);
        }
    }
}
