//! Piece kinds.

use std::fmt;

/// The kind of a piece, without color information.
///
/// Discriminants start at 1 so that index 0 of any per-kind table is
/// free for "no piece".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// Length of a per-kind table, including the empty slot at index 0.
    pub const TABLE_LEN: usize = 7;

    /// All piece kinds in index order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Return the table index (1..=6).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase FEN letter for this kind.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl From<cozy_chess::Piece> for PieceKind {
    fn from(piece: cozy_chess::Piece) -> Self {
        match piece {
            cozy_chess::Piece::Pawn => PieceKind::Pawn,
            cozy_chess::Piece::Knight => PieceKind::Knight,
            cozy_chess::Piece::Bishop => PieceKind::Bishop,
            cozy_chess::Piece::Rook => PieceKind::Rook,
            cozy_chess::Piece::Queen => PieceKind::Queen,
            cozy_chess::Piece::King => PieceKind::King,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}
