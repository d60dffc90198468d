//! Fixed-depth move selection.

pub mod negamax;
pub mod terminal;

use ply_core::Rules;
use tracing::{debug, info};

use negamax::{INF, SearchContext, negamax};

/// Search depth in plies when none is configured.
pub const DEFAULT_DEPTH: u8 = 3;

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// Move chosen for the side to move.
    pub best_move: M,
    /// Score of `best_move` for the side to move. `None` when the move was
    /// forced and nothing was searched.
    pub score: Option<i32>,
    /// Negamax calls made below the root.
    pub nodes: u64,
    /// Depth the search ran at.
    pub depth: u8,
}

/// Why a search could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The side to move has no legal moves; the game is already over.
    #[error("no legal moves in the root position")]
    NoLegalMoves,
    /// A root search needs at least one ply.
    #[error("search depth must be at least 1")]
    ZeroDepth,
}

/// Pick a move for the side to move by searching `depth` plies.
///
/// Root moves are tried in the order the rules enumerate them, and only a
/// strictly better score replaces the incumbent, so the first of several
/// equally scored moves wins. A lone legal move is returned without any
/// search. If every move scores as a forced loss the first move stands.
///
/// The position is left exactly as it was found.
pub fn think<R: Rules>(rules: &mut R, depth: u8) -> Result<SearchResult<R::Move>, SearchError> {
    let moves = rules.legal_moves();
    let Some(&first) = moves.first() else {
        return Err(SearchError::NoLegalMoves);
    };

    if moves.len() == 1 {
        debug!(best = %first, "single legal move, search skipped");
        return Ok(SearchResult {
            best_move: first,
            score: None,
            nodes: 0,
            depth,
        });
    }

    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }

    let mut ctx = SearchContext::new();
    let mut best_move = first;
    let mut best_eval = -INF;

    for mv in moves {
        let eval = {
            let mut child = rules.play_scoped(mv);
            -negamax(&mut *child, depth - 1, -best_eval, &mut ctx)
        };
        debug!(mv = %mv, eval, "root move searched");

        if eval > best_eval {
            best_eval = eval;
            best_move = mv;
        }
    }

    info!(best = %best_move, score = best_eval, nodes = ctx.nodes, depth, "search complete");

    Ok(SearchResult {
        best_move,
        score: Some(best_eval),
        nodes: ctx.nodes,
        depth,
    })
}

/// Move searcher holding the configured depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Searcher {
    depth: u8,
}

impl Searcher {
    /// Create a searcher that looks `depth` plies ahead.
    pub fn new(depth: u8) -> Self {
        Self { depth }
    }

    /// Configured depth in plies.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Change the configured depth.
    pub fn set_depth(&mut self, depth: u8) {
        self.depth = depth;
    }

    /// Run [`think`] at the configured depth.
    pub fn search<R: Rules>(&self, rules: &mut R) -> Result<SearchResult<R::Move>, SearchError> {
        think(rules, self.depth)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
