//! Fitness-proportional (roulette wheel) parent selection.

use rand::Rng;

/// Cumulative selection table over a fixed list of candidates.
///
/// Candidate `i` is picked with probability `fitness[i] / Σ fitness`. If every
/// candidate has zero fitness the wheel falls back to a uniform choice.
///
/// ```
/// use evosnake_training::selection::RouletteWheel;
///
/// let wheel = RouletteWheel::new([1, 1, 2]).unwrap();
/// assert_eq!(wheel.thresholds(), &[0.25, 0.5, 1.0]);
/// assert_eq!(wheel.index_for(0.3), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    thresholds: Vec<f64>,
}

impl RouletteWheel {
    /// Builds the table; returns `None` when there are no candidates.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn new<I>(fitness: I) -> Option<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let fitness: Vec<u64> = fitness.into_iter().collect();
        if fitness.is_empty() {
            return None;
        }

        let total: u128 = fitness.iter().map(|&f| u128::from(f)).sum();
        let count = fitness.len() as f64;
        let mut thresholds: Vec<f64> = if total == 0 {
            (1..=fitness.len()).map(|i| i as f64 / count).collect()
        } else {
            let mut cumulative = 0_u128;
            fitness
                .iter()
                .map(|&f| {
                    cumulative += u128::from(f);
                    cumulative as f64 / total as f64
                })
                .collect()
        };
        // guard against rounding leaving the last threshold just under 1.0
        if let Some(last) = thresholds.last_mut() {
            *last = 1.0;
        }
        Some(Self { thresholds })
    }

    /// Cumulative probabilities, non-decreasing and ending at `1.0`.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Maps a draw `u ∈ [0, 1)` to the candidate whose slice contains it.
    #[must_use]
    pub fn index_for(&self, u: f64) -> usize {
        self.thresholds
            .partition_point(|&t| t <= u)
            .min(self.thresholds.len() - 1)
    }

    /// Draws one candidate index.
    pub fn select<R>(&self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        self.index_for(rng.random::<f64>())
    }
}
