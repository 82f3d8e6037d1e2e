use std::fmt;

use crate::Coordinate;

use super::GameState;

const SNAKE_CELL: char = 'S';
const FOOD_CELL: char = 'F';
const EMPTY_CELL: char = '-';

/// Renders the board as a character grid, one row per line.
///
/// Snake segments are `S`, food is `F`, and empty cells are `-`. The grid is followed by a
/// blank line, and a lost game additionally reports the final score.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let cell = Coordinate::new(x, y);
                let ch = if self.contains_segment(cell) {
                    SNAKE_CELL
                } else if self.food() == Some(cell) {
                    FOOD_CELL
                } else {
                    EMPTY_CELL
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        if self.is_lost() {
            writeln!(f, "Game Over!")?;
            writeln!(f, "Score: {}", self.score())?;
        }
        Ok(())
    }
}
