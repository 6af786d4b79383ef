//! Goshawk chess engine search core.
//!
//! Two complementary searchers over a shared tapered evaluator:
//!
//! - an iterative-deepening alpha-beta negamax search with quiescence
//!   extension, killer/history move ordering and a triangular principal
//!   variation table ([`search`]);
//! - a Monte-Carlo tree search with UCB1 selection, arena-allocated nodes
//!   and bounded random playouts ([`mcts`]).
//!
//! Board representation and move generation are delegated to `cozy-chess`,
//! wrapped in a [`BoardStack`] that provides make/undo semantics, search
//! ply tracking and repetition detection.

pub mod boardstack;
pub mod eval;
pub mod eval_constants;
pub mod mcts;
pub mod movegen;
pub mod movelist;
pub mod search;
pub mod utils;

pub use boardstack::BoardStack;
pub use eval::PestoEval;
pub use movelist::MoveList;
