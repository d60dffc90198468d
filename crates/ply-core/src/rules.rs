//! The rules capability consumed by the search.
//!
//! Anything that can enumerate legal moves, apply and undo them in LIFO
//! order, and answer the terminal-state questions can be searched. The
//! search never constructs moves itself; it only replays what
//! [`Rules::legal_moves`] hands out.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Square index, 0 = a1 through 63 = h8.
    pub square: u8,
    /// Kind of the piece.
    pub kind: PieceKind,
    /// Owner of the piece.
    pub color: Color,
}

/// Game rules over a single mutable position.
pub trait Rules {
    /// Opaque move handle produced by [`legal_moves`](Rules::legal_moves).
    type Move: Copy + Eq + fmt::Debug + fmt::Display;

    /// Legal moves in a deterministic order for an unchanged position.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play `mv`, which must come from [`legal_moves`](Rules::legal_moves)
    /// on the current position.
    fn apply(&mut self, mv: Self::Move);

    /// Take back the most recent [`apply`](Rules::apply).
    fn undo(&mut self);

    /// The side to move has no legal moves and is in check.
    fn is_checkmate(&self) -> bool;

    /// The side to move has no legal moves and is not in check.
    fn is_stalemate(&self) -> bool;

    /// Neither side has enough material left to deliver mate.
    fn is_insufficient_material(&self) -> bool;

    /// The side to move may claim a draw (repetition or move-count rule).
    fn can_claim_draw(&self) -> bool;

    /// Every piece on the board.
    fn piece_placement(&self) -> Vec<Placement>;

    /// Color whose turn it is.
    fn side_to_move(&self) -> Color;

    /// Apply `mv` and return a guard that undoes it when dropped.
    ///
    /// The guard dereferences to `self`, so recursion can continue on the
    /// child position through it. Dropping the guard on any exit path,
    /// early returns included, restores the parent position.
    fn play_scoped(&mut self, mv: Self::Move) -> Applied<'_, Self>
    where
        Self: Sized,
    {
        self.apply(mv);
        Applied { rules: self }
    }
}

/// A move applied through [`Rules::play_scoped`]; undone on drop.
pub struct Applied<'a, R: Rules> {
    rules: &'a mut R,
}

impl<R: Rules> Deref for Applied<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.rules
    }
}

impl<R: Rules> DerefMut for Applied<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.rules
    }
}

impl<R: Rules> Drop for Applied<'_, R> {
    fn drop(&mut self) {
        self.rules.undo();
    }
}
