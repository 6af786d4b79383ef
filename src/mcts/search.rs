//! MCTS driver: selection, expansion, simulation, backpropagation.
//!
//! Each iteration replays moves from a snapshot of the root position, so
//! the board a node implies is reconstructed on the way down and the tree
//! itself never stores positions.

use cozy_chess::{Board, Move};
use log::debug;
use rand::Rng;

use crate::eval::{centipawn_from_prob, winning_prob, PestoEval};
use crate::mcts::arena::{Arena, NodeId};
use crate::mcts::node::MctsNode;
use crate::mcts::policy::{pick_untried, ExpansionPolicy};
use crate::mcts::{DEFAULT_ARENA_MB, ROLLOUT_BUDGET, UCB_CONST};
use crate::movegen::generate_moves;
use crate::search::info::{EngineState, SearchInfo};
use crate::utils::format_move;

#[derive(Clone, Copy, Debug)]
pub struct MctsConfig {
    pub exploration_constant: f64,
    pub rollout_budget: u32,
    pub arena_mb: usize,
    pub policy: ExpansionPolicy,
    /// Iteration cap on top of the time/stop protocol; mostly for tests.
    pub max_iterations: Option<u64>,
    pub verbose: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: UCB_CONST,
            rollout_budget: ROLLOUT_BUDGET,
            arena_mb: DEFAULT_ARENA_MB,
            policy: ExpansionPolicy::Random,
            max_iterations: None,
            verbose: false,
        }
    }
}

/// The search tree: an arena of nodes plus the root snapshot.
pub struct MctsTree {
    arena: Arena,
    root: NodeId,
    root_board: Board,
}

impl MctsTree {
    pub fn new(board: Board, arena_mb: usize) -> Self {
        let mut arena = Arena::with_capacity_mb(arena_mb.max(1));
        let root = arena
            .alloc(MctsNode::new(&board, None, None))
            .expect("a fresh arena always fits the root node");
        Self {
            arena,
            root,
            root_board: board,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_board(&self) -> &Board {
        &self.root_board
    }

    pub fn node(&self, id: NodeId) -> &MctsNode {
        self.arena.get(id)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Argmax of UCB over the children. Deterministic: the first maximum
    /// wins ties.
    pub fn best_child(&self, id: NodeId, exploration_constant: f64, exploration: bool) -> Option<NodeId> {
        let parent_visits = self.node(id).visits;
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for &child in &self.node(id).children {
            let value = self
                .node(child)
                .ucb(parent_visits, exploration_constant, exploration);
            if value > best_value {
                best_value = value;
                best = Some(child);
            }
        }
        best
    }

    /// Descends from the root while nodes are fully expanded, applying each
    /// selected action to `board`. Returns the first expandable or terminal
    /// node.
    pub fn select(&self, board: &mut Board, ply: &mut usize, exploration_constant: f64) -> NodeId {
        let mut id = self.root;
        loop {
            let node = self.node(id);
            if node.is_terminal() || !node.is_fully_expanded() {
                return id;
            }
            match self.best_child(id, exploration_constant, true) {
                Some(next) => {
                    let mv = self
                        .node(next)
                        .action
                        .expect("non-root nodes store the action that reached them");
                    board.play(mv);
                    *ply += 1;
                    id = next;
                }
                None => return id,
            }
        }
    }

    /// Expands one untried move of `id` into a child, advancing `board`
    /// into the child position. Returns `id` unchanged when the node is
    /// terminal, fully expanded, or the arena is out of space.
    pub fn expand<R: Rng>(
        &mut self,
        id: NodeId,
        board: &mut Board,
        ply: &mut usize,
        info: &mut SearchInfo,
        pesto: &PestoEval,
        policy: ExpansionPolicy,
        rng: &mut R,
    ) -> NodeId {
        {
            let node = self.node(id);
            if node.is_terminal() || node.is_fully_expanded() {
                return id;
            }
        }
        if !self.arena.has_space() {
            return id;
        }

        let picked = pick_untried(policy, board, &self.node(id).untried, pesto, rng);
        let Some(mv) = picked else {
            return id;
        };

        board.play(mv);
        *ply += 1;

        let child = MctsNode::new(board, Some(mv), Some(id));
        match self.arena.alloc(child) {
            Some(child_id) => {
                let parent = self.arena.get_mut(id);
                parent.untried.remove(mv);
                parent.children.push(child_id);
                info.nodes += 1;
                info.seldepth = info.seldepth.max(*ply);
                child_id
            }
            None => id,
        }
    }

    /// Walks the parent chain negating the reward at every step, so each
    /// node accumulates reward from its own side-to-move point of view.
    pub fn backprop(&mut self, id: NodeId, mut reward: f64) {
        let mut current = Some(id);
        while let Some(i) = current {
            reward = -reward;
            let node = self.arena.get_mut(i);
            node.update(reward);
            current = node.parent;
        }
    }

    /// Tears the tree down and releases the arena budget. The tree must be
    /// rebuilt before further use.
    pub fn reset(&mut self) {
        self.arena.reset();
    }
}

/// Bounded random playout. The reward is in `[-1, 1]` from the point of
/// view of the side to move at entry: -1 mated, +1 opponent mated, 0
/// stalemate, otherwise the sigmoid-squashed static evaluation.
pub fn simulate<R: Rng>(board: &Board, pesto: &PestoEval, budget: u32, rng: &mut R) -> f64 {
    let mut board = board.clone();
    let color = board.side_to_move();
    let mut budget = budget;

    loop {
        let moves = generate_moves(&board);
        if moves.is_empty() {
            if !board.checkers().is_empty() {
                return if board.side_to_move() == color {
                    -1.0
                } else {
                    1.0
                };
            }
            return 0.0;
        }
        if budget == 0 {
            break;
        }
        board.play(moves.get(rng.gen_range(0..moves.len())));
        budget -= 1;
    }

    // The playout ended mid-game; fall back on the evaluator, flipped to
    // the entry side's point of view.
    let mut cp = pesto.eval(&board);
    if board.side_to_move() != color {
        cp = -cp;
    }
    2.0 * winning_prob(cp) - 1.0
}

/// Runs MCTS until stopped and emits `bestmove` from the root child with
/// the best exploration-free UCB.
pub fn mcts_search(
    board: &Board,
    pesto: &PestoEval,
    info: &mut SearchInfo,
    config: &MctsConfig,
) -> Option<Move> {
    info.clear();
    info.state = EngineState::Searching;

    let mut tree = MctsTree::new(board.clone(), config.arena_mb);
    let mut rng = rand::thread_rng();
    let mut iterations: u64 = 0;

    while !info.stopped() {
        if let Some(limit) = config.max_iterations {
            if iterations >= limit {
                break;
            }
        }

        let mut working = tree.root_board().clone();
        let mut ply = 0usize;

        let selected = tree.select(&mut working, &mut ply, config.exploration_constant);
        let expanded = tree.expand(
            selected,
            &mut working,
            &mut ply,
            info,
            pesto,
            config.policy,
            &mut rng,
        );
        let reward = simulate(&working, pesto, config.rollout_budget, &mut rng);
        tree.backprop(expanded, reward);
        iterations += 1;

        if config.verbose && info.nodes > 0 && info.nodes % 10_000 == 0 {
            print_info_line(&tree, info, config);
        }
    }

    let best = tree
        .best_child(tree.root(), config.exploration_constant, false)
        .and_then(|id| tree.node(id).action);

    if config.verbose {
        match best {
            Some(mv) => println!("bestmove {}", format_move(board, mv)),
            None => println!("bestmove 0000"),
        }
    }

    dump_root_statistics(&tree, config);

    tree.reset();
    info.state = EngineState::Stopped;
    best
}

fn print_info_line(tree: &MctsTree, info: &SearchInfo, config: &MctsConfig) {
    let Some(best) = tree.best_child(tree.root(), config.exploration_constant, false) else {
        return;
    };
    let root_visits = tree.node(tree.root()).visits;
    let ucb = tree
        .node(best)
        .ucb(root_visits, config.exploration_constant, false);
    let cp = centipawn_from_prob((ucb + 1.0) / 2.0);
    let mv = tree.node(best).action.map_or_else(
        || "0000".to_string(),
        |mv| format_move(tree.root_board(), mv),
    );
    println!(
        "info depth {} score cp {} nodes {} pv {}",
        info.seldepth, cp, info.nodes, mv
    );
}

fn dump_root_statistics(tree: &MctsTree, config: &MctsConfig) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    let root_visits = tree.node(tree.root()).visits;
    for &child in &tree.node(tree.root()).children {
        let node = tree.node(child);
        let mv = node
            .action
            .map_or_else(|| "0000".to_string(), |mv| format_move(tree.root_board(), mv));
        debug!(
            "root child {mv}: visits {} reward {:.3} ucb {:.4} ucb+explore {:.4}",
            node.visits,
            node.total_reward,
            node.ucb(root_visits, config.exploration_constant, false),
            node.ucb(root_visits, config.exploration_constant, true),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn simulate_scores_a_mated_entry_side_minus_one() {
        // White is already checkmated; the playout is over before it
        // starts.
        let board: Board = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();
        let pesto = PestoEval::new();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(simulate(&board, &pesto, 3, &mut rng), -1.0);
    }

    #[test]
    fn simulate_scores_a_stalemate_zero() {
        let board: Board = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let pesto = PestoEval::new();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(simulate(&board, &pesto, 3, &mut rng), 0.0);
    }

    #[test]
    fn simulate_reward_stays_in_bounds() {
        let board = Board::default();
        let pesto = PestoEval::new();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let r = simulate(&board, &pesto, 3, &mut rng);
            assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn expansion_adds_one_child_and_consumes_one_untried_move() {
        let mut tree = MctsTree::new(Board::default(), 1);
        let mut info = SearchInfo::new();
        let pesto = PestoEval::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = tree.root_board().clone();
        let mut ply = 0;

        let root = tree.root();
        let child = tree.expand(
            root,
            &mut board,
            &mut ply,
            &mut info,
            &pesto,
            ExpansionPolicy::Random,
            &mut rng,
        );
        assert_ne!(child, root);
        assert_eq!(tree.node(root).children.len(), 1);
        assert_eq!(tree.node(root).untried.len(), 19);
        assert_eq!(tree.node(child).parent, Some(root));
        assert_eq!(ply, 1);
        assert_eq!(info.nodes, 1);
    }

    #[test]
    fn backprop_alternates_the_reward_sign() {
        let mut tree = MctsTree::new(Board::default(), 1);
        let mut info = SearchInfo::new();
        let pesto = PestoEval::new();
        let mut rng = StdRng::seed_from_u64(2);
        let mut board = tree.root_board().clone();
        let mut ply = 0;

        let root = tree.root();
        let child = tree.expand(
            root,
            &mut board,
            &mut ply,
            &mut info,
            &pesto,
            ExpansionPolicy::Random,
            &mut rng,
        );
        tree.backprop(child, 0.5);

        assert_eq!(tree.node(child).visits, 1);
        assert_eq!(tree.node(root).visits, 1);
        assert_eq!(tree.node(child).total_reward, -0.5);
        assert_eq!(tree.node(root).total_reward, 0.5);
    }
}
