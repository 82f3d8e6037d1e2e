use serde::{Deserialize, Serialize};

/// A 2D integer point on the grid.
///
/// Coordinates are plain values: two coordinates are the same cell exactly when both
/// components match. They also double as step vectors, so a head position plus a
/// [`Direction::vector`] is the next head position.
///
/// # Example
///
/// ```
/// use evosnake_engine::{Coordinate, Direction};
///
/// let head = Coordinate::new(4, 0);
/// assert_eq!(head + Direction::Right.vector(), Coordinate::new(5, 0));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Display,
)]
#[display("({x}, {y})")]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the Manhattan distance between two coordinates.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// A cardinal direction of travel.
///
/// The snake always moves one cell per turn along its current direction, and it may
/// never reverse directly into its own neck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the unit step vector for this direction.
    #[must_use]
    pub const fn vector(self) -> Coordinate {
        match self {
            Self::Up => Coordinate::new(0, -1),
            Self::Down => Coordinate::new(0, 1),
            Self::Left => Coordinate::new(-1, 0),
            Self::Right => Coordinate::new(1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_are_unit_cardinal() {
        for dir in Direction::ALL {
            let v = dir.vector();
            assert_eq!(v.x.abs() + v.y.abs(), 1, "{dir} is not a unit vector");
        }
    }

    #[test]
    fn test_opposite_cancels_vector() {
        for dir in Direction::ALL {
            assert_eq!(dir.vector() + dir.opposite().vector(), Coordinate::default());
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Coordinate::new(1, 2);
        let b = Coordinate::new(-3, 7);
        assert_eq!(a.manhattan_distance(b), 9);
        assert_eq!(b.manhattan_distance(a), 9);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(3, -1).to_string(), "(3, -1)");
    }
}
