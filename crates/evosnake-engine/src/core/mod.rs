//! Board geometry value types.
//!
//! - [`Coordinate`] - A cell position (or a unit step) on the grid
//! - [`Direction`] - One of the four cardinal headings the snake can travel in
//! - [`GridSize`] - Board dimensions and the initial snake length
//!
//! # Coordinate System
//!
//! The origin is the top-left cell. `x` grows to the right and `y` grows downwards, so
//! [`Direction::Up`] is the vector `(0, -1)`.

pub use self::{coordinate::*, grid::*};

mod coordinate;
mod grid;
