use std::{
    io::{self, Write as _},
    thread,
    time::Duration,
};

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use evosnake_engine::GameState;
use evosnake_evaluator::episode::EpisodeObserver;
use evosnake_training::genome::GenomeId;

/// Redraws every state of an episode in the terminal.
///
/// Each frame clears the screen, prints the genome id, turn, and board, then waits for
/// `delay` before the next move is made.
#[derive(Debug)]
pub struct TerminalObserver {
    genome_id: GenomeId,
    delay: Duration,
}

impl TerminalObserver {
    pub fn new(genome_id: GenomeId, delay: Duration) -> Self {
        Self { genome_id, delay }
    }

    fn draw(&self, state: &GameState) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        write!(stdout, "{}", frame(self.genome_id, state))?;
        stdout.flush()
    }
}

impl EpisodeObserver for TerminalObserver {
    fn observe(&mut self, state: &GameState) {
        if let Err(e) = self.draw(state) {
            log::warn!("failed to draw turn {}: {e}", state.turn());
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

fn frame(genome_id: GenomeId, state: &GameState) -> String {
    format!(
        "Current Genome ID: {genome_id}\nCurrent Turn: {}\n{state}",
        state.turn()
    )
}
