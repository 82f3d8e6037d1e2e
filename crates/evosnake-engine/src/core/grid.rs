use serde::{Deserialize, Serialize};

use crate::GridSizeError;

use super::Coordinate;

/// Board dimensions and the length of a freshly spawned snake.
///
/// The default is a 25×15 grid with a snake of length 5, laid out along the top row.
///
/// Deserialization goes through [`GridSize::new`], so an invalid size in a config file is
/// rejected up front instead of producing a broken game later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGridSize")]
pub struct GridSize {
    width: i32,
    height: i32,
    initial_length: usize,
}

#[derive(Deserialize)]
struct RawGridSize {
    width: i32,
    height: i32,
    initial_length: usize,
}

impl TryFrom<RawGridSize> for GridSize {
    type Error = GridSizeError;

    fn try_from(raw: RawGridSize) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height, raw.initial_length)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GridSize {
    pub const DEFAULT: Self = Self {
        width: 25,
        height: 15,
        initial_length: 5,
    };

    /// Creates a validated grid size.
    ///
    /// The initial snake must fit on the top row and leave at least one free cell for food.
    pub fn new(width: i32, height: i32, initial_length: usize) -> Result<Self, GridSizeError> {
        if width <= 0 || height <= 0 {
            return Err(GridSizeError::EmptyGrid { width, height });
        }
        if initial_length == 0 {
            return Err(GridSizeError::SnakeTooShort);
        }
        if !i32::try_from(initial_length).is_ok_and(|len| len <= width) {
            return Err(GridSizeError::SnakeTooLong {
                length: initial_length,
                width,
            });
        }
        let cells = usize::try_from(i64::from(width) * i64::from(height)).unwrap_or(usize::MAX);
        if initial_length >= cells {
            return Err(GridSizeError::NoRoomForFood {
                width,
                height,
                length: initial_length,
            });
        }
        Ok(Self {
            width,
            height,
            initial_length,
        })
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn initial_length(&self) -> usize {
        self.initial_length
    }

    /// Total number of cells on the board (`W * H`).
    #[must_use]
    pub const fn cell_count(&self) -> i32 {
        self.width * self.height
    }

    /// Sum of the grid's width and height (`W + H`).
    #[must_use]
    pub const fn perimeter_span(&self) -> i32 {
        self.width + self.height
    }

    #[must_use]
    pub const fn contains(&self, c: Coordinate) -> bool {
        0 <= c.x && c.x < self.width && 0 <= c.y && c.y < self.height
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }
}
