//! Search and evaluation for ply.

pub mod eval;
pub mod search;

pub use eval::evaluate;
pub use search::negamax::{INF, LOSS, SearchContext, negamax};
pub use search::terminal::{Terminal, classify};
pub use search::{DEFAULT_DEPTH, SearchError, SearchResult, Searcher, think};
