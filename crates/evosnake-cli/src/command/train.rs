use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use chrono::Utc;
use evosnake_training::{genetic::Evolution, genome::Genome, record, statistics::GenerationStats};
use rand::SeedableRng as _;
use rand_pcg::Pcg64;

use crate::{
    command::play,
    config::{EvaluationMode, TrainConfig, TrainOverrides},
    report::{GenomeReport, TrainingReport},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// JSON config file; command line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Number of generations to evolve
    #[arg(long)]
    generations: Option<usize>,
    /// Turn limit of each fitness episode
    #[arg(long)]
    turn_limit: Option<u32>,
    /// Number of genomes per generation
    #[arg(long)]
    population: Option<usize>,
    /// Evaluate genomes one after another (serial) or on threads (parallel)
    #[arg(long)]
    evaluation: Option<EvaluationMode>,
    /// Output path of the best genome record
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write a JSON training report to this file
    #[arg(long)]
    history: Option<PathBuf>,
    /// Skip the rendered demonstration episode
    #[arg(long)]
    no_demo: bool,
    /// Turn limit of the demonstration episode
    #[arg(long)]
    demo_turn_limit: Option<u32>,
    /// Milliseconds each demonstration frame stays on screen
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl TrainArg {
    fn overrides(&self) -> TrainOverrides {
        TrainOverrides {
            seed: self.seed,
            generations: self.generations,
            turn_limit: self.turn_limit,
            population_size: self.population,
            evaluation: self.evaluation,
            record_path: self.output.clone(),
            no_demo: self.no_demo,
            demo_turn_limit: self.demo_turn_limit,
            delay_ms: self.delay_ms,
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let started_at = Utc::now();
    let config = TrainConfig::load(arg.config.as_deref())?.with_overrides(arg.overrides());

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("training seed: {seed}");
    let mut rng = Pcg64::seed_from_u64(seed);

    let mut evolution = Evolution::initialize(config.evolution, &mut rng)
        .context("Invalid evolution parameters")?;
    let mut history = Vec::with_capacity(config.generations + 1);

    for _ in 0..config.generations {
        evaluate(&mut evolution, &config, &mut rng);
        history.extend(report_generation(&evolution));
        evolution.spawn_next_generation(&mut rng);
    }
    evaluate(&mut evolution, &config, &mut rng);
    history.extend(report_generation(&evolution));

    let best = evolution
        .best()
        .cloned()
        .context("Population is empty after training")?;

    if let Some(path) = &arg.history {
        let report = TrainingReport {
            seed,
            config: config.clone(),
            started_at,
            finished_at: Utc::now(),
            generations: history,
            best: GenomeReport::from(&best),
        };
        util::write_json_file("training report", path, &report)?;
        eprintln!("Training report saved to {}", path.display());
    }

    save_then_demo(&best, &config.record_path, |genome| {
        if config.demo.enabled {
            play::play_rendered(
                genome,
                &config.evolution,
                config.demo.turn_limit,
                Duration::from_millis(config.demo.delay_ms),
                &mut rng,
            );
        }
    });

    eprintln!();
    eprintln!("Best genome:");
    eprintln!("{best}");
    if let Some(archived) = evolution.best_archived() {
        eprintln!(
            "Best archived genome: {} (fitness {})",
            archived.id(),
            archived.fitness()
        );
    }

    Ok(())
}

/// Writes the record of `best` before the demonstration starts, so interrupting the demo
/// keeps the trained genome. A failed save is logged and does not stop the demo.
fn save_then_demo<F>(best: &Genome, record_path: &Path, demo: F)
where
    F: FnOnce(&Genome),
{
    match record::save_to_file(best, record_path) {
        Ok(()) => eprintln!("Successfully saved genome to {}", record_path.display()),
        Err(e) => log::warn!("{e}"),
    }
    demo(best);
}

fn evaluate(evolution: &mut Evolution, config: &TrainConfig, rng: &mut Pcg64) {
    match config.evaluation {
        EvaluationMode::Serial => evolution.evaluate_generation(config.turn_limit, rng),
        EvaluationMode::Parallel => evolution.evaluate_generation_parallel(config.turn_limit, rng),
    }
}

fn report_generation(evolution: &Evolution) -> Option<GenerationStats> {
    let fitness = evolution
        .population()
        .iter()
        .map(|g| format!("{},", g.fitness()))
        .collect::<String>();
    eprintln!("Generation: {}", evolution.generation());
    eprintln!("Sorted Fitness: {fitness}");
    evolution.statistics()
}
