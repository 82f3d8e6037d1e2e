//! Heuristic features extracted from a game state.
//!
//! Each [`Feature`] maps a [`GameState`] to a raw number. The state evaluator multiplies
//! every feature by its weight and sums the products.
//!
//! | # | feature | value |
//! |---|---|---|
//! | 1 | [`Feature::TurnCount`] | turns elapsed |
//! | 2 | [`Feature::Score`] | `score * (W + H)` |
//! | 3 | [`Feature::DistanceToFood`] | Manhattan distance from head to food |
//! | 4–7 | `DistanceTo{Top,Bottom,Left,Right}Edge` | cells between head and that edge |
//! | 8–11 | `DistanceTo{Up,Down,Left,Right}Body` | cells to the nearest segment along a ray |
//!
//! The score is scaled by `W + H`, the largest swing the food distance can make. When the
//! snake eats, the food jumps elsewhere and the distance feature can get worse; the scale
//! keeps a meal worth more than any such swing, so a policy cannot profit from circling
//! food without eating it.

use evosnake_engine::{Direction, GameState};

pub use self::body_scan::distance_to_body;

mod body_scan;

/// Number of heuristic features (and therefore genes per genome).
pub const FEATURE_COUNT: usize = 11;

/// A single heuristic feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Feature {
    #[display("Turn Count")]
    TurnCount,
    #[display("Score")]
    Score,
    #[display("To Food")]
    DistanceToFood,
    #[display("To Top Edge")]
    DistanceToTopEdge,
    #[display("To Bottom Edge")]
    DistanceToBottomEdge,
    #[display("To Left Edge")]
    DistanceToLeftEdge,
    #[display("To Right Edge")]
    DistanceToRightEdge,
    #[display("To Up Body")]
    DistanceToUpBody,
    #[display("To Down Body")]
    DistanceToDownBody,
    #[display("To Left Body")]
    DistanceToLeftBody,
    #[display("To Right Body")]
    DistanceToRightBody,
}

impl Feature {
    /// All features in gene order.
    ///
    /// This order is also the field order of persisted genome records.
    pub const ALL: [Self; FEATURE_COUNT] = [
        Self::TurnCount,
        Self::Score,
        Self::DistanceToFood,
        Self::DistanceToTopEdge,
        Self::DistanceToBottomEdge,
        Self::DistanceToLeftEdge,
        Self::DistanceToRightEdge,
        Self::DistanceToUpBody,
        Self::DistanceToDownBody,
        Self::DistanceToLeftBody,
        Self::DistanceToRightBody,
    ];

    /// Position of this feature in [`Feature::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier of the gene weighting this feature.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::TurnCount => "gene_turn_count",
            Self::Score => "gene_score",
            Self::DistanceToFood => "gene_distance_to_food",
            Self::DistanceToTopEdge => "gene_distance_to_top_edge",
            Self::DistanceToBottomEdge => "gene_distance_to_bottom_edge",
            Self::DistanceToLeftEdge => "gene_distance_to_left_edge",
            Self::DistanceToRightEdge => "gene_distance_to_right_edge",
            Self::DistanceToUpBody => "gene_distance_to_up_body",
            Self::DistanceToDownBody => "gene_distance_to_down_body",
            Self::DistanceToLeftBody => "gene_distance_to_left_body",
            Self::DistanceToRightBody => "gene_distance_to_right_body",
        }
    }

    /// Computes the raw value of this feature for `state`.
    #[must_use]
    pub fn compute(self, state: &GameState) -> i64 {
        let grid = state.grid();
        let head = state.head();
        match self {
            Self::TurnCount => i64::from(state.turn()),
            Self::Score => i64::from(state.score()) * i64::from(grid.perimeter_span()),
            Self::DistanceToFood => state
                .food()
                .map_or(0, |food| i64::from(head.manhattan_distance(food))),
            Self::DistanceToTopEdge => i64::from(head.y),
            Self::DistanceToBottomEdge => i64::from(grid.height() - 1 - head.y),
            Self::DistanceToLeftEdge => i64::from(head.x),
            Self::DistanceToRightEdge => i64::from(grid.width() - 1 - head.x),
            Self::DistanceToUpBody => i64::from(distance_to_body(state, Direction::Up)),
            Self::DistanceToDownBody => i64::from(distance_to_body(state, Direction::Down)),
            Self::DistanceToLeftBody => i64::from(distance_to_body(state, Direction::Left)),
            Self::DistanceToRightBody => i64::from(distance_to_body(state, Direction::Right)),
        }
    }
}
