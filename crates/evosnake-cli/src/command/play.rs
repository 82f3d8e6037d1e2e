use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use evosnake_evaluator::episode::EpisodeRunner;
use evosnake_training::{genetic::EvolutionParams, genome::Genome, record};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64;

use crate::{config::TrainConfig, display::TerminalObserver};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the genome record
    #[arg(default_value = "last_best_genome.txt")]
    record_path: PathBuf,
    /// Maximum number of turns to play
    #[arg(long, default_value_t = 1000)]
    turn_limit: u32,
    /// Milliseconds each frame stays on screen
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
    /// Seed for food placement and tie-breaking
    #[arg(long)]
    seed: Option<u64>,
    /// Training config file whose grid and search depth the genome was trained with
    #[arg(long)]
    config: Option<PathBuf>,
    /// Plies searched per move; overrides the config file
    #[arg(long)]
    depth: Option<usize>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        record_path,
        turn_limit,
        delay_ms,
        seed,
        config,
        depth,
    } = arg;

    let genome = record::load_from_file(record_path)
        .with_context(|| format!("Failed to load genome from {}", record_path.display()))?;
    eprintln!("Successfully loaded genome in {}", record_path.display());

    let params = play_params(config.as_deref(), *depth)?;
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("play seed: {seed}");

    play_rendered(
        &genome,
        &params,
        *turn_limit,
        Duration::from_millis(*delay_ms),
        &mut Pcg64::seed_from_u64(seed),
    );
    eprintln!("{genome}");
    Ok(())
}

/// Evolution parameters of the training run, with the command line depth applied.
fn play_params(config: Option<&Path>, depth: Option<usize>) -> anyhow::Result<EvolutionParams> {
    let mut params = TrainConfig::load(config)?.evolution;
    if let Some(depth) = depth {
        params.lookahead_depth = depth;
    }
    params.validate().context("Invalid play parameters")?;
    Ok(params)
}

/// Plays one episode with `genome`, drawing every state in the terminal.
///
/// The genome is not modified; its recorded fitness stays that of training.
pub(crate) fn play_rendered<R>(
    genome: &Genome,
    params: &EvolutionParams,
    turn_limit: u32,
    delay: Duration,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    let runner = EpisodeRunner::new(params.grid, turn_limit);
    let mut observer = TerminalObserver::new(genome.id(), delay);
    let summary = runner.play(
        &genome.turn_evaluator(params.lookahead_depth),
        rng,
        &mut observer,
    );
    if !summary.status().is_lost() {
        println!("Final Score: {}", summary.score());
    }
    log::info!(
        "demonstration: score={} turns={} fitness={}",
        summary.score(),
        summary.turns(),
        summary.fitness()
    );
}
