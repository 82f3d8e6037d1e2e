use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::{Rng, seq::IndexedRandom as _};

use crate::{
    StateError, TransitionError,
    core::{Coordinate, Direction, GridSize},
};

/// Lifecycle of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameStatus {
    Playing,
    /// The snake left the grid or ran into itself.
    Lost,
    /// The snake occupies every cell, so no food can be placed anymore.
    Cleared,
}

/// One snapshot of a snake game.
///
/// The snake is stored tail-first: the front of the deque is the oldest segment and
/// the back is the head.
///
/// # Invariants
///
/// While the game is not lost:
///
/// - every snake segment lies inside the grid and no two segments coincide
/// - the food (if any) never lies on the snake
///
/// A lost state keeps the snake exactly as it was before the fatal move.
///
/// # Example
///
/// ```
/// use evosnake_engine::{Coordinate, Direction, GameState, GridSize};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let mut rng = Pcg32::seed_from_u64(1);
/// let state = GameState::new(GridSize::default(), &mut rng);
///
/// assert_eq!(state.head(), Coordinate::new(4, 0));
/// assert_eq!(state.direction(), Direction::Right);
///
/// // Moving up from the top row leaves the grid.
/// let lost = state.transition(Direction::Up, &mut rng).unwrap();
/// assert!(lost.is_lost());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    grid: GridSize,
    snake: VecDeque<Coordinate>,
    food: Option<Coordinate>,
    direction: Direction,
    score: u32,
    turn: u32,
    status: GameStatus,
}

impl GameState {
    /// Creates the initial state of an episode.
    ///
    /// The snake occupies `(0, 0)` through `(L - 1, 0)` with its head on the right, heads
    /// right, and food is placed uniformly at random on a free cell.
    pub fn new<R>(grid: GridSize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let snake = (0..grid.width())
            .take(grid.initial_length())
            .map(|x| Coordinate::new(x, 0))
            .collect();
        let mut this = Self {
            grid,
            snake,
            food: None,
            direction: Direction::Right,
            score: 0,
            turn: 0,
            status: GameStatus::Playing,
        };
        this.place_food(rng);
        this
    }

    /// Builds a state from explicit parts, with score and turn at zero.
    ///
    /// `snake` is given tail-first (the last coordinate is the head).
    pub fn from_parts<I>(
        grid: GridSize,
        snake: I,
        food: Coordinate,
        direction: Direction,
    ) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let snake: VecDeque<Coordinate> = snake.into_iter().collect();
        if snake.is_empty() {
            return Err(StateError::EmptySnake);
        }
        for (i, &segment) in snake.iter().enumerate() {
            if !grid.contains(segment) {
                return Err(StateError::SegmentOutOfBounds(segment));
            }
            if snake.iter().skip(i + 1).any(|&other| other == segment) {
                return Err(StateError::DuplicateSegment(segment));
            }
        }
        if !grid.contains(food) {
            return Err(StateError::FoodOutOfBounds(food));
        }
        if snake.contains(&food) {
            return Err(StateError::FoodOnSnake(food));
        }
        Ok(Self {
            grid,
            snake,
            food: Some(food),
            direction,
            score: 0,
            turn: 0,
            status: GameStatus::Playing,
        })
    }

    #[must_use]
    pub fn grid(&self) -> &GridSize {
        &self.grid
    }

    /// Returns the snake body, tail first and head last.
    #[must_use]
    pub fn snake(&self) -> &VecDeque<Coordinate> {
        &self.snake
    }

    #[must_use]
    pub fn head(&self) -> Coordinate {
        // `from_parts` and `new` both guarantee a non-empty snake, and it never shrinks.
        self.snake[self.snake.len() - 1]
    }

    #[must_use]
    pub fn contains_segment(&self, c: Coordinate) -> bool {
        self.snake.contains(&c)
    }

    /// Returns the food position, or `None` once the board is cleared.
    #[must_use]
    pub fn food(&self) -> Option<Coordinate> {
        self.food
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.status.is_lost()
    }

    /// Returns `true` if no further transition is allowed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.status.is_playing()
    }

    /// Returns the three moves available from this state.
    ///
    /// Reversing into the neck is never offered. The order is fixed per heading so that
    /// search tie-breaking is reproducible:
    ///
    /// | heading | actions |
    /// |---|---|
    /// | Up | Up, Left, Right |
    /// | Down | Down, Left, Right |
    /// | Left | Up, Left, Down |
    /// | Right | Up, Down, Right |
    #[must_use]
    pub fn legal_actions(&self) -> ArrayVec<Direction, 3> {
        use Direction::{Down, Left, Right, Up};
        let actions = match self.direction {
            Up => [Up, Left, Right],
            Down => [Down, Left, Right],
            Left => [Up, Left, Down],
            Right => [Up, Down, Right],
        };
        ArrayVec::from(actions)
    }

    /// Returns the state reached by moving one cell in `action`.
    ///
    /// The new state always has `action` as its heading and one more turn. Then exactly
    /// one of the following applies, checked in this order:
    ///
    /// 1. The head lands on food: the snake grows, score increases, and new food is drawn
    ///    from `rng` among the free cells (the game is cleared if none remain).
    /// 2. The head leaves the grid or hits the snake: the game is lost and nothing else
    ///    changes.
    /// 3. Otherwise the snake moves forward, dropping its oldest tail segment.
    ///
    /// `self` is left untouched.
    pub fn transition<R>(&self, action: Direction, rng: &mut R) -> Result<Self, TransitionError>
    where
        R: Rng + ?Sized,
    {
        if self.is_terminal() {
            return Err(TransitionError::Terminal);
        }

        let mut next = self.clone();
        next.direction = action;
        next.turn += 1;

        let new_head = self.head() + action.vector();
        if self.food == Some(new_head) {
            next.snake.push_back(new_head);
            next.score += 1;
            next.place_food(rng);
        } else if !self.grid.contains(new_head) || self.contains_segment(new_head) {
            next.status = GameStatus::Lost;
        } else {
            next.snake.push_back(new_head);
            next.snake.pop_front();
        }

        Ok(next)
    }

    fn place_food<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let free_cells = self
            .grid
            .cells()
            .filter(|c| !self.snake.contains(c))
            .collect::<Vec<_>>();
        self.food = free_cells.choose(rng).copied();
        if self.food.is_none() {
            self.status = GameStatus::Cleared;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn row_snake() -> Vec<Coordinate> {
        (0..5).map(|x| Coordinate::new(x, 0)).collect()
    }

    fn state_with_food(food: Coordinate) -> GameState {
        GameState::from_parts(GridSize::default(), row_snake(), food, Direction::Right).unwrap()
    }

    fn assert_invariants(state: &GameState) {
        let grid = state.grid();
        let segments: HashSet<_> = state.snake().iter().copied().collect();
        assert_eq!(segments.len(), state.snake().len(), "duplicate segments");
        if !state.is_lost() {
            assert!(state.snake().iter().all(|&c| grid.contains(c)));
        }
        if let Some(food) = state.food() {
            assert!(grid.contains(food));
            assert!(!segments.contains(&food), "food on snake");
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn test_initial_layout() {
            let mut rng = Pcg32::seed_from_u64(0);
            let state = GameState::new(GridSize::default(), &mut rng);
            assert_eq!(state.snake().iter().copied().collect::<Vec<_>>(), row_snake());
            assert_eq!(state.head(), Coordinate::new(4, 0));
            assert_eq!(state.direction(), Direction::Right);
            assert_eq!(state.score(), 0);
            assert_eq!(state.turn(), 0);
            assert_eq!(state.status(), GameStatus::Playing);
            assert_invariants(&state);
        }

        #[test]
        fn test_same_seed_same_food() {
            let a = GameState::new(GridSize::default(), &mut Pcg32::seed_from_u64(42));
            let b = GameState::new(GridSize::default(), &mut Pcg32::seed_from_u64(42));
            assert_eq!(a, b);
        }

        #[test]
        fn test_from_parts_rejects_invalid() {
            let grid = GridSize::default();
            let food = Coordinate::new(10, 10);
            assert_eq!(
                GameState::from_parts(grid, Vec::new(), food, Direction::Right),
                Err(StateError::EmptySnake)
            );
            assert_eq!(
                GameState::from_parts(grid, [Coordinate::new(-1, 0)], food, Direction::Right),
                Err(StateError::SegmentOutOfBounds(Coordinate::new(-1, 0)))
            );
            assert_eq!(
                GameState::from_parts(
                    grid,
                    [Coordinate::new(1, 0), Coordinate::new(1, 0)],
                    food,
                    Direction::Right
                ),
                Err(StateError::DuplicateSegment(Coordinate::new(1, 0)))
            );
            assert_eq!(
                GameState::from_parts(grid, row_snake(), Coordinate::new(3, 0), Direction::Right),
                Err(StateError::FoodOnSnake(Coordinate::new(3, 0)))
            );
            assert_eq!(
                GameState::from_parts(grid, row_snake(), Coordinate::new(25, 0), Direction::Right),
                Err(StateError::FoodOutOfBounds(Coordinate::new(25, 0)))
            );
        }
    }

    mod legal_actions {
        use super::*;

        #[test]
        fn test_fixed_order_per_direction() {
            use Direction::{Down, Left, Right, Up};
            let expected = [
                (Up, [Up, Left, Right]),
                (Down, [Down, Left, Right]),
                (Left, [Up, Left, Down]),
                (Right, [Up, Down, Right]),
            ];
            for (heading, actions) in expected {
                let state = GameState::from_parts(
                    GridSize::default(),
                    [Coordinate::new(5, 5)],
                    Coordinate::new(0, 0),
                    heading,
                )
                .unwrap();
                assert_eq!(state.legal_actions().as_slice(), &actions);
            }
        }

        #[test]
        fn test_never_reverses() {
            for heading in Direction::ALL {
                let state = GameState::from_parts(
                    GridSize::default(),
                    [Coordinate::new(5, 5)],
                    Coordinate::new(0, 0),
                    heading,
                )
                .unwrap();
                let actions = state.legal_actions();
                assert_eq!(actions.len(), 3);
                assert!(!actions.contains(&heading.opposite()));
                let distinct: HashSet<_> = actions.iter().collect();
                assert_eq!(distinct.len(), 3);
            }
        }
    }

    mod transition {
        use super::*;

        #[test]
        fn test_move_forward() {
            let mut rng = Pcg32::seed_from_u64(0);
            let state = state_with_food(Coordinate::new(10, 10));
            let next = state.transition(Direction::Right, &mut rng).unwrap();

            let expected: Vec<_> = (1..6).map(|x| Coordinate::new(x, 0)).collect();
            assert_eq!(next.snake().iter().copied().collect::<Vec<_>>(), expected);
            assert_eq!(next.score(), 0);
            assert_eq!(next.turn(), 1);
            assert!(!next.is_lost());
            assert_eq!(next.food(), Some(Coordinate::new(10, 10)));

            // the parent is left untouched
            assert_eq!(state, state_with_food(Coordinate::new(10, 10)));
        }

        #[test]
        fn test_out_of_bounds_is_loss() {
            let mut rng = Pcg32::seed_from_u64(0);
            let state = state_with_food(Coordinate::new(10, 10));
            let next = state.transition(Direction::Up, &mut rng).unwrap();

            assert!(next.is_lost());
            assert_eq!(next.turn(), 1);
            assert_eq!(next.score(), 0);
            assert_eq!(next.snake(), state.snake());
            assert_eq!(next.food(), state.food());
            assert_eq!(next.direction(), Direction::Up);
        }

        #[test]
        fn test_eat_food_grows() {
            let mut rng = Pcg32::seed_from_u64(0);
            let state = state_with_food(Coordinate::new(5, 0));
            let next = state.transition(Direction::Right, &mut rng).unwrap();

            let expected: Vec<_> = (0..6).map(|x| Coordinate::new(x, 0)).collect();
            assert_eq!(next.snake().iter().copied().collect::<Vec<_>>(), expected);
            assert_eq!(next.score(), 1);
            assert_eq!(next.turn(), 1);
            assert!(!next.is_lost());
            let food = next.food().unwrap();
            assert!(!expected.contains(&food));
            assert_invariants(&next);
        }

        #[test]
        fn test_self_collision_is_loss() {
            let mut rng = Pcg32::seed_from_u64(0);
            // A hook: head at (1,1) heading left, neck at (2,1), body wraps above.
            let snake = [
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(2, 0),
                Coordinate::new(2, 1),
                Coordinate::new(1, 1),
            ];
            let state = GameState::from_parts(
                GridSize::default(),
                snake,
                Coordinate::new(10, 10),
                Direction::Left,
            )
            .unwrap();
            let next = state.transition(Direction::Up, &mut rng).unwrap();
            assert!(next.is_lost());
            assert_eq!(next.snake(), state.snake());
        }

        #[test]
        fn test_moving_into_current_tail_is_loss() {
            let mut rng = Pcg32::seed_from_u64(0);
            // 2x2 loop: the head would step onto the tail cell that is about to move away.
            let snake = [
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1),
                Coordinate::new(0, 1),
            ];
            let state = GameState::from_parts(
                GridSize::default(),
                snake,
                Coordinate::new(10, 10),
                Direction::Left,
            )
            .unwrap();
            let next = state.transition(Direction::Up, &mut rng).unwrap();
            assert!(next.is_lost());
        }

        #[test]
        fn test_terminal_state_rejects_transition() {
            let mut rng = Pcg32::seed_from_u64(0);
            let state = state_with_food(Coordinate::new(10, 10));
            let lost = state.transition(Direction::Up, &mut rng).unwrap();
            assert_eq!(
                lost.transition(Direction::Right, &mut rng),
                Err(TransitionError::Terminal)
            );
        }

        #[test]
        fn test_filling_the_board_clears_the_game() {
            let mut rng = Pcg32::seed_from_u64(0);
            let grid = GridSize::new(3, 1, 2).unwrap();
            let state = GameState::from_parts(
                grid,
                [Coordinate::new(0, 0), Coordinate::new(1, 0)],
                Coordinate::new(2, 0),
                Direction::Right,
            )
            .unwrap();
            let next = state.transition(Direction::Right, &mut rng).unwrap();
            assert_eq!(next.status(), GameStatus::Cleared);
            assert_eq!(next.food(), None);
            assert_eq!(next.score(), 1);
            assert!(next.is_terminal());
            assert!(!next.is_lost());
        }
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_along_random_play(
            seed in any::<u64>(),
            moves in proptest::collection::vec(direction_strategy(), 1..200),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut state = GameState::new(GridSize::new(8, 6, 3).unwrap(), &mut rng);
            for action in moves {
                let before = state.snake().len();
                let score = state.score();
                let next = state.transition(action, &mut rng).unwrap();
                assert_invariants(&next);
                prop_assert_eq!(next.turn(), state.turn() + 1);
                if next.score() > score {
                    prop_assert_eq!(next.snake().len(), before + 1);
                } else {
                    prop_assert_eq!(next.snake().len(), before);
                }
                if next.is_terminal() {
                    break;
                }
                prop_assert!(state.legal_actions().len() == 3);
                state = next;
            }
        }
    }
}
