//! Monte-Carlo tree search.
//!
//! UCB1 selection over an arena-allocated tree, single-child expansion via
//! a pluggable policy, bounded random playouts, and reward backpropagation
//! in negamax convention (each node accumulates reward from its own
//! side-to-move point of view).

pub mod arena;
pub mod categorical;
pub mod node;
pub mod policy;
pub mod search;

/// Exploration constant for UCB1. Tuned by hand; 0 recovers greedy
/// selection.
pub const UCB_CONST: f64 = 2.7;

/// Maximum playout length in plies.
pub const ROLLOUT_BUDGET: u32 = 3;

/// Default arena reservation in MiB.
pub const DEFAULT_ARENA_MB: usize = 2048;

pub use arena::{Arena, NodeId};
pub use categorical::CategoricalSampler;
pub use node::MctsNode;
pub use policy::ExpansionPolicy;
pub use search::{mcts_search, simulate, MctsConfig, MctsTree};
