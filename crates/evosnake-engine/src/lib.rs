//! Snake game engine: grid geometry, game state, and the pure transition model.
//!
//! The engine is split into two layers:
//!
//! - [`core`] - Value types describing the board: [`Coordinate`], [`Direction`], [`GridSize`]
//! - [`engine`] - The game itself: [`GameState`] and its transition function
//!
//! Every transition returns a fresh [`GameState`] and leaves its input untouched, so the
//! lookahead search in `evosnake-evaluator` can branch over many hypothetical futures from
//! one ancestor state.
//!
//! # Example
//!
//! ```
//! use evosnake_engine::{GameState, GridSize};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(7);
//! let state = GameState::new(GridSize::default(), &mut rng);
//!
//! let action = state.legal_actions()[0];
//! let next = state.transition(action, &mut rng).unwrap();
//!
//! assert_eq!(state.turn(), 0);
//! assert_eq!(next.turn(), 1);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when trying to advance a state that has already ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TransitionError {
    #[display("cannot transition a terminal game state")]
    Terminal,
}

/// Error returned when grid dimensions cannot host a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridSizeError {
    #[display("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: i32, height: i32 },
    #[display("initial snake length {length} does not fit in a row of width {width}")]
    SnakeTooLong { length: usize, width: i32 },
    #[display("initial snake length must be at least 1")]
    SnakeTooShort,
    #[display("grid {width}x{height} has no room for food next to a snake of length {length}")]
    NoRoomForFood {
        width: i32,
        height: i32,
        length: usize,
    },
}

/// Error returned when explicit state parts violate the game invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StateError {
    #[display("snake must have at least one segment")]
    EmptySnake,
    #[display("snake segment {_0} is outside the grid")]
    SegmentOutOfBounds(#[error(not(source))] Coordinate),
    #[display("snake segment {_0} appears more than once")]
    DuplicateSegment(#[error(not(source))] Coordinate),
    #[display("food {_0} is outside the grid")]
    FoodOutOfBounds(#[error(not(source))] Coordinate),
    #[display("food {_0} is placed on the snake")]
    FoodOnSnake(#[error(not(source))] Coordinate),
}
