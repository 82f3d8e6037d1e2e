use std::path::PathBuf;

use anyhow::Context as _;
use evosnake_training::record;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    /// Path to the genome record
    #[arg(default_value = "last_best_genome.txt")]
    record_path: PathBuf,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let ShowArg { record_path } = arg;
    let genome = record::load_from_file(record_path)
        .with_context(|| format!("Failed to load genome from {}", record_path.display()))?;
    println!("{genome}");
    Ok(())
}
