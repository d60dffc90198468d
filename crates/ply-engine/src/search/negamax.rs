//! Negamax search with a single-bound fail-soft cutoff.

use ply_core::Rules;

use crate::evaluate;
use crate::search::terminal::{Terminal, classify};

/// Score larger than any material difference; stands in for infinity.
pub const INF: i32 = 1_000_000;

/// Score of a side that is checkmated. Below every reachable material score.
pub const LOSS: i32 = -INF;

/// Search state threaded through negamax calls.
#[derive(Debug, Default)]
pub struct SearchContext {
    /// Negamax calls made so far.
    pub nodes: u64,
}

impl SearchContext {
    /// A context with no nodes visited.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Negamax search to `depth` plies below the current position.
///
/// Returns the score for the side to move. `bound` is the negated best
/// score the parent has already secured: as soon as one child reaches it,
/// that child's score is returned as-is and the remaining moves are
/// skipped. There is no second bound.
///
/// Every move is applied through [`Rules::play_scoped`], so the position is
/// restored before this function returns on every path.
pub fn negamax<R: Rules>(rules: &mut R, depth: u8, bound: i32, ctx: &mut SearchContext) -> i32 {
    ctx.nodes += 1;

    match classify(rules) {
        Terminal::Lost => return LOSS,
        Terminal::Drawn => return 0,
        Terminal::Ongoing => {}
    }

    if depth == 0 {
        return evaluate(rules);
    }

    let mut best = -INF;
    for mv in rules.legal_moves() {
        let eval = {
            let mut child = rules.play_scoped(mv);
            -negamax(&mut *child, depth - 1, -best, ctx)
        };

        if eval >= bound {
            return eval;
        }
        if eval > best {
            best = eval;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use ply_core::{ChessGame, Rules};

    use super::*;

    fn search(game: &mut ChessGame, depth: u8) -> i32 {
        negamax(game, depth, INF, &mut SearchContext::new())
    }

    #[test]
    fn depth_zero_equals_static_eval() {
        let fens = [
            "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/1NBQKBNR w Kkq - 0 1",
            "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/1NBQKBNR b Kkq - 0 1",
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        ];
        for fen in fens {
            let mut game = ChessGame::from_fen(fen).unwrap();
            assert_eq!(search(&mut game, 0), evaluate(&game), "{fen}");
        }
    }

    #[test]
    fn stalemate_scores_zero_at_every_depth() {
        // Black is stalemated while a queen down.
        let mut game = ChessGame::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        for depth in 0..=4 {
            assert_eq!(search(&mut game, depth), 0, "depth {depth}");
        }
    }

    #[test]
    fn checkmated_side_scores_loss_at_every_depth() {
        let mut game = ChessGame::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1").unwrap();
        for depth in 0..=3 {
            assert_eq!(search(&mut game, depth), LOSS, "depth {depth}");
        }
    }

    #[test]
    fn loss_is_below_any_material_score() {
        // Nine queens plus a full set of pieces against a bare king.
        let worst_material = -(9 * 9 + 2 * 5 + 2 * 3 + 2 * 3 + 20);
        assert!(LOSS < worst_material);
    }

    #[test]
    fn terminal_nodes_count_once() {
        let mut game = ChessGame::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        let mut ctx = SearchContext::new();
        negamax(&mut game, 3, INF, &mut ctx);
        assert_eq!(ctx.nodes, 1);
    }

    #[test]
    fn sees_mate_in_one_from_the_mating_side() {
        // White plays Qxf7#.
        let mut game = ChessGame::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        )
        .unwrap();
        assert_eq!(search(&mut game, 1), INF);
    }

    #[test]
    fn position_is_restored_after_search() {
        let mut game = ChessGame::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        )
        .unwrap();
        let before = game.board().clone();
        search(&mut game, 3);
        assert_eq!(game.board(), &before);
        assert!(game.moves_played().is_empty());
    }

    #[test]
    fn first_child_meeting_the_bound_ends_the_node() {
        // Every score is at least -INF, so the first child cuts off.
        let mut game = ChessGame::from_fen("4k3/8/8/3q4/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(game.legal_moves().len() > 1);
        let mut ctx = SearchContext::new();
        negamax(&mut game, 1, -INF, &mut ctx);
        assert_eq!(ctx.nodes, 2);
    }
}
