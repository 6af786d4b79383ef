pub mod alpha_beta;
pub mod history;
pub mod info;
pub mod iterative_deepening;
pub mod ordering;
pub mod pv;
pub mod quiescence;

/// Hard cap on search depth; also bounds the recursion stack.
pub const MAX_PLY: usize = 64;

/// Score infinity. Magnitudes within `MAX_PLY` of it encode mate distances.
pub const INFINITY: i32 = 32_000;

pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= INFINITY - MAX_PLY as i32
}

pub use alpha_beta::{negamax, StackEntry};
pub use history::HistoryTable;
pub use info::{EngineState, SearchInfo};
pub use iterative_deepening::iterative_deepening_search;
pub use ordering::score_moves;
pub use pv::{PvLine, PvTable};
pub use quiescence::quiescence;
