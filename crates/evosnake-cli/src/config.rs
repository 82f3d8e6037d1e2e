use std::path::{Path, PathBuf};

use evosnake_training::genetic::EvolutionParams;
use serde::{Deserialize, Serialize};

use crate::util;

/// How genomes of one generation are evaluated.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// One episode after another on the main thread
    #[default]
    Serial,
    /// One scoped thread per genome
    Parallel,
}

/// Rendered episode played with the best genome after training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub enabled: bool,
    pub turn_limit: u32,
    pub delay_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            turn_limit: 1000,
            delay_ms: 100,
        }
    }
}

/// Settings of a training run, read from an optional JSON file.
///
/// Every field has a default, so a config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Fixed seed for a reproducible run; a random seed is drawn when absent
    pub seed: Option<u64>,
    pub generations: usize,
    /// Turn limit of the fitness episodes
    pub turn_limit: u32,
    pub evaluation: EvaluationMode,
    /// Where the best genome's record is written
    pub record_path: PathBuf,
    pub demo: DemoConfig,
    pub evolution: EvolutionParams,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            seed: None,
            generations: 40,
            turn_limit: 500,
            evaluation: EvaluationMode::default(),
            record_path: PathBuf::from("last_best_genome.txt"),
            demo: DemoConfig::default(),
            evolution: EvolutionParams::default(),
        }
    }
}

/// Values given on the command line; each one that is set wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct TrainOverrides {
    pub seed: Option<u64>,
    pub generations: Option<usize>,
    pub turn_limit: Option<u32>,
    pub population_size: Option<usize>,
    pub evaluation: Option<EvaluationMode>,
    pub record_path: Option<PathBuf>,
    pub no_demo: bool,
    pub demo_turn_limit: Option<u32>,
    pub delay_ms: Option<u64>,
}

impl TrainConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => util::read_json_file("config", path),
            None => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: TrainOverrides) -> Self {
        let TrainOverrides {
            seed,
            generations,
            turn_limit,
            population_size,
            evaluation,
            record_path,
            no_demo,
            demo_turn_limit,
            delay_ms,
        } = overrides;

        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(generations) = generations {
            self.generations = generations;
        }
        if let Some(turn_limit) = turn_limit {
            self.turn_limit = turn_limit;
        }
        if let Some(size) = population_size {
            self.evolution.population_size = size;
        }
        if let Some(evaluation) = evaluation {
            self.evaluation = evaluation;
        }
        if let Some(path) = record_path {
            self.record_path = path;
        }
        if no_demo {
            self.demo.enabled = false;
        }
        if let Some(turn_limit) = demo_turn_limit {
            self.demo.turn_limit = turn_limit;
        }
        if let Some(delay_ms) = delay_ms {
            self.demo.delay_ms = delay_ms;
        }
        self
    }
}
