//! Summary statistics of a generation's fitness.

use serde::{Deserialize, Serialize};

/// Fitness distribution of one evaluated population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
}

impl GenerationStats {
    /// Computes statistics from unsorted fitness values.
    ///
    /// Returns `None` if `fitness` is empty.
    ///
    /// ```
    /// use evosnake_training::statistics::GenerationStats;
    ///
    /// let stats = GenerationStats::new(3, [4000, 20, 1500, 300]).unwrap();
    /// assert_eq!((stats.min, stats.max), (20, 4000));
    /// assert_eq!(stats.median, 900.0);
    /// ```
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn new<I>(generation: usize, fitness: I) -> Option<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut values: Vec<u64> = fitness.into_iter().collect();
        values.sort_unstable();
        let (&min, &max) = (values.first()?, values.last()?);

        let sum: u128 = values.iter().map(|&v| u128::from(v)).sum();
        let mean = sum as f64 / values.len() as f64;
        let mid = values.len() / 2;
        let median = if values.len() % 2 == 0 {
            (values[mid - 1] as f64 + values[mid] as f64) / 2.0
        } else {
            values[mid] as f64
        };

        Some(Self {
            generation,
            min,
            max,
            mean,
            median,
        })
    }
}
