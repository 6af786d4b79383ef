//! Iterative deepening driver.
//!
//! Searches depth 1, 2, ... up to the configured limit, keeping the best
//! move of the last iteration that ran to completion. A stop observed
//! mid-iteration discards that iteration's partial result, so the reported
//! best move always comes from a fully searched depth.

use log::debug;

use crate::boardstack::BoardStack;
use crate::eval::PestoEval;
use crate::search::alpha_beta::{negamax, StackEntry};
use crate::search::history::HistoryTable;
use crate::search::info::{EngineState, SearchInfo};
use crate::search::pv::PvTable;
use crate::search::{is_mate_score, INFINITY, MAX_PLY};
use crate::utils::format_move;

pub fn iterative_deepening_search(
    board: &mut BoardStack,
    pesto: &PestoEval,
    history: &mut HistoryTable,
    info: &mut SearchInfo,
    verbose: bool,
) -> (Option<cozy_chess::Move>, i32) {
    // Blend history from earlier searches instead of starting cold.
    history.age();

    let mut pv = PvTable::new();
    let mut stack = [StackEntry::default(); MAX_PLY + 1];
    info.clear();
    info.state = EngineState::Searching;
    board.reset_ply();

    let mut best_move = None;
    let mut best_score = 0;

    for depth in 1..=info.depth {
        let depth_nodes = info.nodes;

        let score = negamax(
            -INFINITY,
            INFINITY,
            depth,
            board,
            pesto,
            info,
            &mut stack,
            &mut pv,
            history,
        );

        if info.stopped() {
            break;
        }

        best_score = score;
        best_move = pv.best_move();
        stack[0].eval = score;

        if verbose {
            print_info_line(score, depth, board, info, &pv);
        }

        let searched = info.nodes - depth_nodes;
        debug!(
            "depth {} branchf {:.4} ordering {:.2}",
            depth,
            (searched as f64).powf(1.0 / depth as f64),
            info.ordering_quality(),
        );
    }

    if verbose {
        match best_move {
            Some(mv) => println!("bestmove {}", format_move(board.current_state(), mv)),
            None => println!("bestmove 0000"),
        }
    }

    info.state = EngineState::Stopped;
    (best_move, best_score)
}

fn print_info_line(score: i32, depth: i32, board: &BoardStack, info: &SearchInfo, pv: &PvTable) {
    let mut line = format!("info depth {} seldepth {} score ", depth, info.seldepth);

    if is_mate_score(score) {
        let mate = (INFINITY - score.abs() + 1) / 2;
        let mate = if score > 0 { mate } else { -mate };
        line.push_str(&format!("mate {}", mate));
    } else {
        line.push_str(&format!("cp {}", score));
    }

    line.push_str(&format!(
        " nodes {} time {} pv",
        info.nodes,
        info.elapsed().as_millis()
    ));

    // Walk the PV on a scratch board so castling formats correctly at each
    // step.
    let mut scratch = board.current_state().clone();
    for mv in pv.root_line() {
        line.push(' ');
        line.push_str(&format_move(&scratch, mv));
        if scratch.try_play(mv).is_err() {
            break;
        }
    }

    println!("{}", line);
}
