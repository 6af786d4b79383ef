//! Small helpers for presenting moves to the outside world.

use cozy_chess::{Board, File, Move, Piece, Square};

/// Formats a move as UCI. `cozy-chess` encodes castling as the king
/// capturing its own rook; GUIs expect the standard king-two-squares form.
pub fn format_move(board: &Board, mv: Move) -> String {
    if board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == Some(board.side_to_move())
    {
        let file = if mv.to.file() > mv.from.file() {
            File::G
        } else {
            File::C
        };
        let to = Square::new(file, mv.from.rank());
        return Move {
            from: mv.from,
            to,
            promotion: None,
        }
        .to_string();
    }
    mv.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_moves_format_as_coordinates() {
        let board = Board::default();
        let mv = Move {
            from: Square::E2,
            to: Square::E4,
            promotion: None,
        };
        assert_eq!(format_move(&board, mv), "e2e4");
    }

    #[test]
    fn castling_is_normalised() {
        let board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let short = Move {
            from: Square::E1,
            to: Square::H1,
            promotion: None,
        };
        let long = Move {
            from: Square::E1,
            to: Square::A1,
            promotion: None,
        };
        assert_eq!(format_move(&board, short), "e1g1");
        assert_eq!(format_move(&board, long), "e1c1");
    }
}
