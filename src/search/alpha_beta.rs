//! Alpha-beta search in negamax form.
//!
//! Fail-hard window discipline: returns exactly `beta` on a cutoff and
//! `alpha` otherwise, relying on the PV table for best-move recovery. At
//! depth zero the search falls into quiescence rather than evaluating a
//! possibly tactical position.

use crate::boardstack::BoardStack;
use crate::eval::PestoEval;
use crate::movegen::{generate_moves, is_noisy};
use crate::search::history::HistoryTable;
use crate::search::info::SearchInfo;
use crate::search::ordering::score_moves;
use crate::search::pv::PvTable;
use crate::search::quiescence::quiescence;
use crate::search::{INFINITY, MAX_PLY};

/// Per-ply search state: the two killer slots and a static score cache.
#[derive(Clone, Copy, Debug, Default)]
pub struct StackEntry {
    pub killers: [Option<cozy_chess::Move>; 2],
    pub eval: i32,
}

pub fn negamax(
    mut alpha: i32,
    beta: i32,
    depth: i32,
    board: &mut BoardStack,
    pesto: &PestoEval,
    info: &mut SearchInfo,
    stack: &mut [StackEntry; MAX_PLY + 1],
    pv: &mut PvTable,
    history: &mut HistoryTable,
) -> i32 {
    debug_assert!(alpha < beta);
    debug_assert!(depth >= 0);

    let ply = board.ply;
    pv.open(ply);

    if depth <= 0 {
        return quiescence(alpha, beta, board, pesto, info, stack);
    }

    info.nodes += 1;

    if ply > 0 && (board.is_repetition() || board.fifty_move() >= 100) {
        // Randomized draw score, so repeated lines do not all look
        // identical to the search.
        return -2 + (info.nodes & 3) as i32;
    }

    if ply >= MAX_PLY - 1 {
        return pesto.eval(board.current_state());
    }

    stack[ply].eval = pesto.eval(board.current_state());

    let mut moves = generate_moves(board.current_state());
    score_moves(
        board.current_state(),
        &mut moves,
        pv.hint(ply),
        &stack[ply].killers,
        history,
    );

    let mut moves_searched = 0u32;
    let mut best_score = -INFINITY;

    while let Some(mv) = moves.next_best() {
        board.make_move(mv);
        let score = -negamax(
            -beta,
            -alpha,
            depth - 1,
            board,
            pesto,
            info,
            stack,
            pv,
            history,
        );
        board.undo_move();

        if info.stopped() {
            return 0;
        }

        moves_searched += 1;

        if score > best_score {
            best_score = score;
            if score > alpha {
                if score >= beta {
                    if moves_searched == 1 {
                        info.fail_high_first += 1;
                    }
                    info.fail_high += 1;

                    if !is_noisy(board.current_state(), mv) {
                        let killers = &mut stack[ply].killers;
                        if killers[0] != Some(mv) {
                            killers[1] = killers[0];
                            killers[0] = Some(mv);
                        }
                        if let Some(piece) = board.current_state().piece_on(mv.from) {
                            history.update(board.current_state().side_to_move(), piece, mv, depth);
                        }
                    }

                    // The move refutes this line; a lower bound is enough.
                    return beta;
                }

                pv.record(ply, mv);
                alpha = score;
            }
        }
    }

    if moves_searched == 0 {
        // Mate scores encode the distance from the root.
        return if board.is_check() {
            -INFINITY + ply as i32
        } else {
            0
        };
    }

    alpha
}
