use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use evosnake_training::{genome::Genome, statistics::GenerationStats};
use serde::{Deserialize, Serialize};

use crate::config::TrainConfig;

/// JSON summary of a finished training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub seed: u64,
    pub config: TrainConfig,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub generations: Vec<GenerationStats>,
    pub best: GenomeReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeReport {
    pub id: u64,
    pub fitness: u64,
    /// Weights keyed by gene id
    pub weights: BTreeMap<String, f32>,
}

impl From<&Genome> for GenomeReport {
    fn from(genome: &Genome) -> Self {
        Self {
            id: genome.id().get(),
            fitness: genome.fitness(),
            weights: genome
                .weights()
                .iter()
                .map(|(feature, weight)| (feature.id().to_owned(), weight))
                .collect(),
        }
    }
}
