//! Turn evaluation: choosing the move for the current turn.
//!
//! This is the second level of the evaluator architecture. The [`TurnEvaluator`] runs a
//! bounded-depth search over the snake's legal moves and picks the move whose subtree
//! reaches the highest state score.
//!
//! # Search
//!
//! ```text
//! value(a)          = best_value(transition(state, a), depth - 1)
//! best_value(s, 0)  = evaluate(s)
//! best_value(s, d)  = evaluate(s)                                   if s is terminal
//!                   = max over a of best_value(transition(s, a), d - 1)
//! ```
//!
//! With the default depth of 2 every move is judged by the best of its three follow-up
//! moves. Food drawn while searching consumes the same random generator as real play, so
//! the search is deterministic for a seeded generator.
//!
//! Actions that share the best value are tie-broken uniformly at random. One random draw
//! is made per decision even when a single action is best, which keeps the random stream
//! layout independent of how many ties occur.

use arrayvec::ArrayVec;
use evosnake_engine::{Direction, GameState};
use rand::Rng;

use crate::state_evaluator::StateEvaluator;

/// Lookahead depth used when none is configured.
pub const DEFAULT_DEPTH: usize = 2;

/// Picks moves by searching a fixed number of plies ahead.
#[derive(Debug)]
pub struct TurnEvaluator<'a> {
    state_evaluator: Box<dyn StateEvaluator + 'a>,
    depth: usize,
}

impl<'a> TurnEvaluator<'a> {
    /// Creates a turn evaluator searching `depth` plies (at least one).
    #[must_use]
    pub fn new(state_evaluator: Box<dyn StateEvaluator + 'a>, depth: usize) -> Self {
        Self {
            state_evaluator,
            depth: depth.max(1),
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Selects the move to make from `state`.
    ///
    /// Returns `None` only if `state` is terminal.
    pub fn select_action<R>(&self, state: &GameState, rng: &mut R) -> Option<Direction>
    where
        R: Rng + ?Sized,
    {
        let mut best_value = f32::NEG_INFINITY;
        let mut best_actions = ArrayVec::<Direction, 3>::new();

        for action in state.legal_actions() {
            let Ok(next) = state.transition(action, rng) else {
                continue;
            };
            let value = self.best_value_at_depth(&next, self.depth - 1, rng);
            if value > best_value {
                best_value = value;
                best_actions.clear();
                best_actions.push(action);
            } else {
                #[expect(clippy::float_cmp)]
                let tied = value == best_value;
                if tied {
                    best_actions.push(action);
                }
            }
        }

        if best_actions.is_empty() {
            return None;
        }
        Some(best_actions[rng.random_range(0..best_actions.len())])
    }

    /// Returns the best score reachable from `state` within `depth` further moves.
    pub fn best_value_at_depth<R>(&self, state: &GameState, depth: usize, rng: &mut R) -> f32
    where
        R: Rng + ?Sized,
    {
        if depth == 0 || state.is_terminal() {
            return self.state_evaluator.evaluate_state(state);
        }

        let mut best_value = f32::NEG_INFINITY;
        for action in state.legal_actions() {
            let Ok(next) = state.transition(action, rng) else {
                continue;
            };
            best_value = best_value.max(self.best_value_at_depth(&next, depth - 1, rng));
        }
        best_value
    }
}
