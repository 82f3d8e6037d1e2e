//! Game state and transition logic.
//!
//! - [`GameState`] - One immutable snapshot of a game (snake, food, heading, counters)
//! - [`GameStatus`] - Whether the game is still running, lost, or cleared
//!
//! # Game Flow
//!
//! 1. Create a [`GameState`] with [`GameState::new`] (snake on the top row, heading right)
//! 2. Pick one of the three [`GameState::legal_actions`]
//! 3. Call [`GameState::transition`] to obtain the successor state
//! 4. Repeat until [`GameState::is_terminal`]
//!
//! Transitions never mutate their input; a search can keep the parent and explore every
//! child independently.

pub use self::game_state::*;

mod game_state;
mod render;
