//! Material balance evaluation.
//!
//! Sums a fixed value per piece for each side. The result is converted to
//! the negamax convention: positive means the side to move is ahead.

use ply_core::{Color, PieceKind, Rules};

/// Piece values indexed by [`PieceKind::index()`].
///
/// | Index | Piece  | Value |
/// |-------|--------|-------|
/// | 0     | none   | 0     |
/// | 1     | Pawn   | 1     |
/// | 2     | Knight | 3     |
/// | 3     | Bishop | 3     |
/// | 4     | Rook   | 5     |
/// | 5     | Queen  | 9     |
/// | 6     | King   | 20    |
///
/// The king is counted like any other piece. Both sides always have one,
/// so it cancels in legal positions.
pub const PIECE_VALUES: [i32; PieceKind::TABLE_LEN] = [0, 1, 3, 3, 5, 9, 20];

/// Total piece value for White and for Black, in that order.
pub fn material_totals<R: Rules>(rules: &R) -> (i32, i32) {
    rules
        .piece_placement()
        .into_iter()
        .fold((0, 0), |(white, black), placement| {
            let value = PIECE_VALUES[placement.kind.index()];
            match placement.color {
                Color::White => (white + value, black),
                Color::Black => (white, black + value),
            }
        })
}

/// Evaluate material from the perspective of the side to move.
pub fn evaluate<R: Rules>(rules: &R) -> i32 {
    let (white, black) = material_totals(rules);
    (white - black) * rules.side_to_move().sign()
}

#[cfg(test)]
mod tests {
    use ply_core::{ChessGame, PieceKind};

    use super::{PIECE_VALUES, evaluate, material_totals};

    fn game(fen: &str) -> ChessGame {
        ChessGame::from_fen(fen).unwrap()
    }

    #[test]
    fn starting_position_is_zero() {
        let game = ChessGame::new();
        // 8 + 6 + 6 + 10 + 9 + 20 per side.
        assert_eq!(material_totals(&game), (59, 59));
        assert_eq!(evaluate(&game), 0);
    }

    #[test]
    fn queen_for_rook_is_plus_four_for_side_to_move() {
        // White has traded the a1 rook for Black's queen.
        let white_to_move = game("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/1NBQKBNR w Kkq - 0 1");
        assert_eq!(evaluate(&white_to_move), 4);

        let black_to_move = game("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/1NBQKBNR b Kkq - 0 1");
        assert_eq!(evaluate(&black_to_move), -4);
    }

    #[test]
    fn kings_only_count_twenty_each() {
        let game = game("8/8/4k3/8/8/4K3/8/8 w - - 0 1");
        assert_eq!(material_totals(&game), (20, 20));
        assert_eq!(evaluate(&game), 0);
    }

    #[test]
    fn black_ahead_is_negative_for_white() {
        // White is missing the d1 queen.
        let game = game("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1");
        assert_eq!(evaluate(&game), -9);
    }

    #[test]
    fn table_matches_piece_kind_indices() {
        assert_eq!(PIECE_VALUES[0], 0);
        assert_eq!(PIECE_VALUES[PieceKind::Pawn.index()], 1);
        assert_eq!(PIECE_VALUES[PieceKind::Knight.index()], 3);
        assert_eq!(PIECE_VALUES[PieceKind::Bishop.index()], 3);
        assert_eq!(PIECE_VALUES[PieceKind::Rook.index()], 5);
        assert_eq!(PIECE_VALUES[PieceKind::Queen.index()], 9);
        assert_eq!(PIECE_VALUES[PieceKind::King.index()], 20);
    }
}
