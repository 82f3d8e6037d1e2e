use evosnake_engine::{Direction, GameState};

/// Distance from the head to the nearest snake segment along `direction`.
///
/// The ray starts one cell past the head and stops at the first segment, returning the
/// number of steps taken. If the ray reaches the edge without meeting a segment, the
/// distance to that edge is returned instead. Looking straight back over the neck is not
/// a move the snake can make, so that direction always yields `0`.
#[must_use]
pub fn distance_to_body(state: &GameState, direction: Direction) -> i32 {
    if state.direction() == direction.opposite() {
        return 0;
    }

    let grid = state.grid();
    let step = direction.vector();
    let mut cell = state.head() + step;
    let mut distance = 1;
    while grid.contains(cell) {
        if state.contains_segment(cell) {
            return distance;
        }
        cell += step;
        distance += 1;
    }
    distance - 1
}

#[cfg(test)]
mod tests {
    use evosnake_engine::{Coordinate, GridSize};

    use super::*;

    fn state(snake: &[(i32, i32)], direction: Direction) -> GameState {
        GameState::from_parts(
            GridSize::default(),
            snake.iter().map(|&(x, y)| Coordinate::new(x, y)),
            Coordinate::new(24, 14),
            direction,
        )
        .unwrap()
    }

    #[test]
    fn test_backwards_scan_is_zero() {
        let s = state(&[(0, 0), (1, 0), (2, 0)], Direction::Right);
        assert_eq!(distance_to_body(&s, Direction::Left), 0);
    }

    #[test]
    fn test_open_rays_reach_the_edge() {
        let s = state(&[(3, 5), (4, 5), (5, 5)], Direction::Right);
        assert_eq!(distance_to_body(&s, Direction::Up), 5);
        assert_eq!(distance_to_body(&s, Direction::Down), 9);
        assert_eq!(distance_to_body(&s, Direction::Right), 19);
    }

    #[test]
    fn test_ray_stops_at_body() {
        // Hook: head at (2, 2) heading left, body loops up and over the head.
        let s = state(&[(2, 0), (3, 0), (3, 1), (3, 2), (2, 2)], Direction::Left);
        assert_eq!(distance_to_body(&s, Direction::Up), 2);
        assert_eq!(distance_to_body(&s, Direction::Right), 0);
        assert_eq!(distance_to_body(&s, Direction::Left), 2);
        assert_eq!(distance_to_body(&s, Direction::Down), 12);
    }

    #[test]
    fn test_head_on_edge_has_zero_distance_outwards() {
        let s = state(&[(0, 0), (1, 0), (2, 0)], Direction::Right);
        assert_eq!(distance_to_body(&s, Direction::Up), 0);
    }
}
