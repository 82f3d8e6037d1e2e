use clap::{Parser, Subcommand};

use self::{play::PlayArg, show::ShowArg, train::TrainArg};

mod play;
mod show;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve snake policies with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Play a rendered episode with a saved genome
    Play(#[clap(flatten)] PlayArg),
    /// Print the genes of a saved genome
    Show(#[clap(flatten)] ShowArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Show(arg) => show::run(&arg)?,
    }
    Ok(())
}
