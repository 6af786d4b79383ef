//! Expansion policies: which untried move to turn into a child.

use cozy_chess::{Board, Move};
use rand::Rng;

use crate::eval::{winning_prob, PestoEval};
use crate::mcts::categorical::CategoricalSampler;
use crate::movelist::MoveList;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExpansionPolicy {
    /// Uniform over the untried moves.
    Random,
    /// Weight each move by how poor the resulting position looks for the
    /// opponent, then sample through the alias table.
    EvalWeighted,
}

pub fn pick_untried<R: Rng>(
    policy: ExpansionPolicy,
    board: &Board,
    untried: &MoveList,
    pesto: &PestoEval,
    rng: &mut R,
) -> Option<Move> {
    if untried.is_empty() {
        return None;
    }
    match policy {
        ExpansionPolicy::Random => Some(untried.get(rng.gen_range(0..untried.len()))),
        ExpansionPolicy::EvalWeighted => {
            let weights = expansion_weights(board, untried, pesto);
            let sampler = CategoricalSampler::new(&weights);
            Some(untried.get(sampler.sample(rng)))
        }
    }
}

/// After a move the evaluation is from the opponent's point of view, so a
/// move is good for us when `winning_prob` is low for them. Cubing sharpens
/// the preference for clearly better moves.
pub(crate) fn expansion_weights(board: &Board, untried: &MoveList, pesto: &PestoEval) -> Vec<f64> {
    let mut weights = Vec::with_capacity(untried.len());
    for &mv in untried.iter() {
        let mut child = board.clone();
        child.play(mv);
        let w = 1.0 - winning_prob(pesto.eval(&child));
        weights.push(100.0 * w * w * w);
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::generate_moves;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_policy_picks_a_listed_move() {
        let board = Board::default();
        let untried = generate_moves(&board);
        let pesto = PestoEval::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mv =
                pick_untried(ExpansionPolicy::Random, &board, &untried, &pesto, &mut rng).unwrap();
            assert!(untried.contains(mv));
        }
    }

    #[test]
    fn eval_weighted_policy_prefers_the_capture_of_a_hanging_queen() {
        // Black queen on d5 is en prise to the c4 pawn.
        let board: Board = "rnb1kbnr/ppp1pppp/8/3q4/2P5/8/PP1PPPPP/RNBQKBNR w KQkq - 0 3"
            .parse()
            .unwrap();
        let untried = generate_moves(&board);
        let pesto = PestoEval::new();
        let weights = expansion_weights(&board, &untried, &pesto);

        let capture_idx = untried
            .iter()
            .position(|&mv| mv.from == cozy_chess::Square::C4 && mv.to == cozy_chess::Square::D5)
            .expect("pawn takes queen must be legal");
        let max = weights.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(weights[capture_idx], max);

        // And the sampler picks it far more often than a uniform draw
        // would.
        let sampler = CategoricalSampler::new(&weights);
        let mut rng = StdRng::seed_from_u64(9);
        let hits = (0..2000)
            .filter(|_| sampler.sample(&mut rng) == capture_idx)
            .count();
        let uniform_expectation = 2000 / untried.len();
        assert!(
            hits > 3 * uniform_expectation,
            "capture sampled only {hits}/2000 times"
        );
    }

    #[test]
    fn empty_untried_list_yields_nothing() {
        let board = Board::default();
        let untried = MoveList::new();
        let pesto = PestoEval::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pick_untried(ExpansionPolicy::Random, &board, &untried, &pesto, &mut rng).is_none());
    }
}
