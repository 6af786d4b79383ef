//! Move ordering scores.
//!
//! Priority, highest first: the PV move from a previous iteration, captures
//! by MVV-LVA, promotions, the two killers at this ply, then history
//! counters for the remaining quiet moves.

use cozy_chess::{Board, Move, Piece};

use crate::movegen;
use crate::movelist::MoveList;
use crate::search::history::HistoryTable;

const PV_BONUS: i32 = 2_000_000;
const NOISY_BONUS: i32 = 1_000_000;
const FIRST_KILLER_BONUS: i32 = 900_000;
const SECOND_KILLER_BONUS: i32 = 800_000;

fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 20_000,
    }
}

/// Most valuable victim, least valuable attacker. En passant has an empty
/// target square and scores as a pawn capture.
pub(crate) fn mvv_lva(board: &Board, mv: Move) -> i32 {
    let victim = board
        .piece_on(mv.to)
        .map(piece_value)
        .unwrap_or(piece_value(Piece::Pawn));
    let attacker = board.piece_on(mv.from).map(piece_value).unwrap_or(0);
    victim * 10 - attacker
}

/// Annotates every move in the list with its ordering score.
pub fn score_moves(
    board: &Board,
    moves: &mut MoveList,
    pv_move: Option<Move>,
    killers: &[Option<Move>; 2],
    history: &HistoryTable,
) {
    let stm = board.side_to_move();
    for i in 0..moves.len() {
        let mv = moves.get(i);
        let score = if pv_move == Some(mv) {
            PV_BONUS
        } else if movegen::is_capture(board, mv) {
            NOISY_BONUS + mvv_lva(board, mv)
        } else if let Some(promo) = mv.promotion {
            NOISY_BONUS + piece_value(promo)
        } else if killers[0] == Some(mv) {
            FIRST_KILLER_BONUS
        } else if killers[1] == Some(mv) {
            SECOND_KILLER_BONUS
        } else {
            match board.piece_on(mv.from) {
                Some(piece) => history.get(stm, piece, mv),
                None => 0,
            }
        };
        moves.set_score(i, score);
    }
}

/// Scores a noisy-only list for quiescence; killers and history do not
/// apply there.
pub fn score_noisy(board: &Board, moves: &mut MoveList) {
    for i in 0..moves.len() {
        let mv = moves.get(i);
        let score = match mv.promotion {
            Some(promo) if !movegen::is_capture(board, mv) => NOISY_BONUS + piece_value(promo),
            _ => NOISY_BONUS + mvv_lva(board, mv),
        };
        moves.set_score(i, score);
    }
}
