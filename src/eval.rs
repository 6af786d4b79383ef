//! Tapered static evaluation and the centipawn/probability mapping.
//!
//! Middlegame and endgame piece-square scores are interpolated by game
//! phase. The score is returned from the side-to-move point of view so the
//! negamax convention holds throughout the search.

use cozy_chess::{Board, Color, Piece};

use crate::eval_constants::{EG_PESTO_TABLE, EG_VALUE, GAMEPHASE_INC, MG_PESTO_TABLE, MG_VALUE};

const PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

const BISHOP_PAIR_BONUS: [i32; 2] = [22, 44];

/// Tapered piece-square evaluator with per-color tables precomputed at
/// construction.
#[derive(Clone, Debug)]
pub struct PestoEval {
    mg_table: [[[i32; 64]; 6]; 2],
    eg_table: [[[i32; 64]; 6]; 2],
}

impl PestoEval {
    pub fn new() -> Self {
        let mut mg_table = [[[0; 64]; 6]; 2];
        let mut eg_table = [[[0; 64]; 6]; 2];

        let white = Color::White as usize;
        let black = Color::Black as usize;
        for p in 0..6 {
            for sq in 0..64 {
                // The visual tables read rank 8 first; White mirrors them.
                mg_table[white][p][sq] = MG_VALUE[p] + MG_PESTO_TABLE[p][sq ^ 56];
                eg_table[white][p][sq] = EG_VALUE[p] + EG_PESTO_TABLE[p][sq ^ 56];
                mg_table[black][p][sq] = MG_VALUE[p] + MG_PESTO_TABLE[p][sq];
                eg_table[black][p][sq] = EG_VALUE[p] + EG_PESTO_TABLE[p][sq];
            }
        }

        PestoEval { mg_table, eg_table }
    }

    /// Centipawn score from the side-to-move point of view.
    pub fn eval(&self, board: &Board) -> i32 {
        let mut mg = [0i32; 2];
        let mut eg = [0i32; 2];
        let mut phase = 0i32;

        for color in [Color::White, Color::Black] {
            let ci = color as usize;
            for &piece in &PIECES {
                let pi = piece as usize;
                let bb = board.colors(color) & board.pieces(piece);
                for sq in bb {
                    mg[ci] += self.mg_table[ci][pi][sq as usize];
                    eg[ci] += self.eg_table[ci][pi][sq as usize];
                    phase += GAMEPHASE_INC[pi];
                }
            }
            if (board.colors(color) & board.pieces(Piece::Bishop)).len() >= 2 {
                mg[ci] += BISHOP_PAIR_BONUS[0];
                eg[ci] += BISHOP_PAIR_BONUS[1];
            }
        }

        let mg_score = mg[0] - mg[1];
        let eg_score = eg[0] - eg[1];
        let mg_phase = phase.min(24);
        let eg_phase = 24 - mg_phase;
        let score = (mg_score * mg_phase + eg_score * eg_phase) / 24;

        if board.side_to_move() == Color::White {
            score
        } else {
            -score
        }
    }
}

impl Default for PestoEval {
    fn default() -> Self {
        Self::new()
    }
}

/// Logistic mapping from centipawns to a winning probability in `[0, 1]`.
pub fn winning_prob(cp: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(-(cp as f64) / 400.0))
}

/// Inverse of [`winning_prob`], clamped to a sane centipawn range.
pub fn centipawn_from_prob(p: f64) -> i32 {
    let p = p.clamp(1e-6, 1.0 - 1e-6);
    let cp = -400.0 * (1.0 / p - 1.0).log10();
    (cp.round() as i32).clamp(-2000, 2000)
}
