//! Terminal-state classification ahead of depth-based scoring.

use ply_core::Rules;

/// What the rules say about a position before any search happens there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Play continues.
    Ongoing,
    /// The side to move is checkmated.
    Lost,
    /// Claimable draw, insufficient material, or stalemate.
    Drawn,
}

/// Classify the current position.
///
/// Checkmate is tested first; the three draw predicates come strictly
/// after it and strictly before any depth cutoff in the caller.
pub fn classify<R: Rules>(rules: &R) -> Terminal {
    if rules.is_checkmate() {
        Terminal::Lost
    } else if rules.can_claim_draw()
        || rules.is_insufficient_material()
        || rules.is_stalemate()
    {
        Terminal::Drawn
    } else {
        Terminal::Ongoing
    }
}
