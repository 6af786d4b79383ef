//! Quiescence search.
//!
//! Extends the search over noisy moves only, so the static evaluation is
//! taken at tactically quiet positions and the horizon effect cannot hide
//! a hanging piece one ply past the nominal depth. Stand-pat first, then
//! captures and promotions in best-first order, same fail-hard window as
//! the main search. Does not touch the PV table or the killers.

use crate::boardstack::BoardStack;
use crate::eval::PestoEval;
use crate::movegen::generate_noisy;
use crate::search::alpha_beta::StackEntry;
use crate::search::info::SearchInfo;
use crate::search::ordering::score_noisy;
use crate::search::MAX_PLY;

pub fn quiescence(
    mut alpha: i32,
    beta: i32,
    board: &mut BoardStack,
    pesto: &PestoEval,
    info: &mut SearchInfo,
    stack: &mut [StackEntry; MAX_PLY + 1],
) -> i32 {
    debug_assert!(alpha < beta);

    info.nodes += 1;

    let ply = board.ply;
    if ply > info.seldepth {
        info.seldepth = ply - 1;
    }

    // Stand-pat: the side to move can usually do at least as well as the
    // static score by declining all captures.
    let score = pesto.eval(board.current_state());
    stack[ply].eval = score;

    if ply >= MAX_PLY - 1 {
        return score;
    }

    if score >= beta {
        return beta;
    }
    if score > alpha {
        alpha = score;
    }

    let mut noisy = generate_noisy(board.current_state());
    score_noisy(board.current_state(), &mut noisy);

    while let Some(mv) = noisy.next_best() {
        board.make_move(mv);
        let score = -quiescence(-beta, -alpha, board, pesto, info, stack);
        board.undo_move();

        if info.stopped() {
            return 0;
        }

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
