//! State evaluation: scoring a single game state.
//!
//! This is the first level of the evaluator architecture. A [`StateEvaluator`] assigns a
//! number to a [`GameState`]; the turn evaluator searches for the move that leads to the
//! highest number.
//!
//! # Weighted features
//!
//! The production evaluator is [`FeatureWeights`] itself, which scores a state as
//!
//! ```text
//! score = w₁·f₁ + w₂·f₂ + ... + w₁₁·f₁₁ - (lost ? W·H : 0)
//! ```
//!
//! where `fᵢ` are the raw [`Feature`] values. The loss penalty does not depend on the
//! weights.
//!
//! # Penalty dominance
//!
//! A losing move should always score below a surviving one. Two children of the same
//! state differ by a bounded amount in each feature (see [`max_sibling_swing`]), so with
//! every weight in `[-1, 1]` the penalty wins whenever the swing is smaller than `W·H`.
//! [`penalty_dominates`] checks this for a grid. It holds for every square grid of side 8
//! or more, including the default 25×15 grid (swing 156, penalty 375), but not for tiny
//! boards such as 4×2.

use std::fmt;

use evosnake_engine::{GameState, GridSize};

use crate::{feature::Feature, weights::FeatureWeights};

/// Assigns a score to a game state (higher is better).
pub trait StateEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_state(&self, state: &GameState) -> f32;
}

/// Penalty subtracted from the score of a lost state: the number of cells on the grid.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn loss_penalty(grid: &GridSize) -> f32 {
    grid.cell_count() as f32
}

/// Upper bound on the difference in weighted feature sum between a lost child and a
/// surviving sibling, for weights within `[-1, 1]`.
///
/// A lost state keeps the snake of its parent, while a surviving sibling has moved its
/// head one cell. Per feature the two can differ by at most:
///
/// | feature | bound |
/// |---|---|
/// | turn count | 0 (both took one turn) |
/// | score | `W + H` (one meal) |
/// | food distance | `W + H - 2` (food may respawn anywhere) |
/// | four edge distances | 2 in total (one step along one axis) |
/// | four body scans | `2(W - 1) + 2(H - 1)` (each ray fits in its axis) |
///
/// which sums to `4(W + H) - 4`.
#[must_use]
pub const fn max_sibling_swing(grid: &GridSize) -> i32 {
    4 * grid.perimeter_span() - 4
}

/// Returns `true` if the loss penalty of `grid` outweighs [`max_sibling_swing`].
///
/// On such a grid any genome with weights in `[-1, 1]` rates every losing move below
/// every surviving one.
#[must_use]
pub const fn penalty_dominates(grid: &GridSize) -> bool {
    max_sibling_swing(grid) < grid.cell_count()
}

impl StateEvaluator for FeatureWeights {
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_state(&self, state: &GameState) -> f32 {
        let weighted: f32 = Feature::ALL
            .into_iter()
            .map(|f| self[f] * f.compute(state) as f32)
            .sum();
        if state.is_lost() {
            weighted - loss_penalty(state.grid())
        } else {
            weighted
        }
    }
}

#[cfg(test)]
mod tests {
    use evosnake_engine::{Coordinate, Direction};
    use proptest::prelude::*;
    use rand::{SeedableRng as _, seq::IndexedRandom as _};
    use rand_pcg::Pcg32;

    use super::*;

    fn row_state(food: Coordinate) -> GameState {
        GameState::from_parts(
            GridSize::default(),
            (0..5).map(|x| Coordinate::new(x, 0)),
            food,
            Direction::Right,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let state = row_state(Coordinate::new(10, 3));
        assert!(FeatureWeights::zeros().evaluate_state(&state).abs() < f32::EPSILON);
    }

    #[test]
    fn test_weighted_sum() {
        let state = row_state(Coordinate::new(10, 3));
        let mut weights = FeatureWeights::zeros();
        weights[Feature::DistanceToFood] = -1.0;
        weights[Feature::DistanceToRightEdge] = 0.5;
        // -1 * 9 + 0.5 * 20
        assert!((weights.evaluate_state(&state) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lost_state_is_penalized() {
        let mut rng = Pcg32::seed_from_u64(0);
        let state = row_state(Coordinate::new(10, 3));
        let lost = state.transition(Direction::Up, &mut rng).unwrap();
        assert!(lost.is_lost());

        let weights = FeatureWeights::zeros();
        let expected = -loss_penalty(lost.grid());
        assert!((weights.evaluate_state(&lost) - expected).abs() < f32::EPSILON);
        assert!((expected + 375.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_penalty_dominance_by_grid() {
        let default = GridSize::default();
        assert_eq!(max_sibling_swing(&default), 156);
        assert!(penalty_dominates(&default));
        assert!(penalty_dominates(&GridSize::new(8, 8, 3).unwrap()));
        assert!(!penalty_dominates(&GridSize::new(7, 7, 3).unwrap()));
        assert!(!penalty_dominates(&GridSize::new(4, 2, 2).unwrap()));
    }

    #[test]
    fn test_losing_move_can_tie_or_outrank_sibling_on_tiny_grid() {
        // head (1, 0) heading right; Up leaves the grid, Right eats
        let mut rng = Pcg32::seed_from_u64(0);
        let grid = GridSize::new(4, 2, 2).unwrap();
        let state = GameState::from_parts(
            grid,
            [Coordinate::new(0, 0), Coordinate::new(1, 0)],
            Coordinate::new(2, 0),
            Direction::Right,
        )
        .unwrap();
        let mut weights = FeatureWeights::zeros();
        weights[Feature::Score] = -1.0;
        weights[Feature::DistanceToFood] = -1.0;
        weights[Feature::DistanceToLeftEdge] = -1.0;
        weights[Feature::DistanceToRightEdge] = 1.0;

        let lost = state.transition(Direction::Up, &mut rng).unwrap();
        assert!(lost.is_lost());
        let worst_alive = [Direction::Right, Direction::Down]
            .into_iter()
            .map(|a| state.transition(a, &mut rng.clone()).unwrap())
            .filter(|s| !s.is_lost())
            .map(|s| weights.evaluate_state(&s))
            .fold(f32::INFINITY, f32::min);
        assert!(!penalty_dominates(&grid));
        assert!(weights.evaluate_state(&lost) >= worst_alive);
    }

    /// Plays `steps` random non-suicidal moves, stopping early if none remain.
    fn random_walk(grid: GridSize, seed: u64, steps: usize) -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = GameState::new(grid, &mut rng);
        for _ in 0..steps {
            let mut survivors = Vec::new();
            for action in state.legal_actions() {
                let mut probe = rng.clone();
                let next = state.transition(action, &mut probe).unwrap();
                if !next.is_terminal() {
                    survivors.push(action);
                }
            }
            let Some(&action) = survivors.choose(&mut rng) else {
                break;
            };
            state = state.transition(action, &mut rng).unwrap();
        }
        (state, rng)
    }

    fn assert_losses_rank_last(weights: &FeatureWeights, state: &GameState, rng: &mut Pcg32) {
        let children: Vec<_> = state
            .legal_actions()
            .into_iter()
            .map(|a| state.transition(a, rng).unwrap())
            .collect();
        let lost = children.iter().filter(|c| c.is_lost());
        let alive: Vec<_> = children.iter().filter(|c| !c.is_lost()).collect();
        for l in lost {
            for a in &alive {
                assert!(weights.evaluate_state(l) < weights.evaluate_state(a));
            }
        }
    }

    proptest! {
        #[test]
        fn test_losing_move_scores_below_surviving_sibling(
            genes in proptest::array::uniform11(-1.0f32..=1.0),
            seed in any::<u64>(),
            steps in 0usize..80,
        ) {
            let weights = FeatureWeights::from_array(genes);
            let (state, mut rng) = random_walk(GridSize::default(), seed, steps);
            assert_losses_rank_last(&weights, &state, &mut rng);
        }

        #[test]
        fn test_losing_move_ranks_last_on_any_dominant_grid(
            genes in proptest::array::uniform11(-1.0f32..=1.0),
            width in 4i32..=30,
            height in 1i32..=20,
            length in 1usize..=3,
            seed in any::<u64>(),
            steps in 0usize..200,
        ) {
            let grid = GridSize::new(width, height, length).unwrap();
            prop_assume!(penalty_dominates(&grid));
            let weights = FeatureWeights::from_array(genes);
            let (state, mut rng) = random_walk(grid, seed, steps);
            assert_losses_rank_last(&weights, &state, &mut rng);
        }
    }
}
