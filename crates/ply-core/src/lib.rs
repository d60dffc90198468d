//! Game rules for ply: the rules capability the search consumes and a
//! standard chess implementation of it.

mod color;
mod error;
mod game;
mod piece_kind;
mod rules;

pub use color::Color;
pub use cozy_chess::Move;
pub use error::GameError;
pub use game::{ChessGame, Outcome, PrettyBoard, STARTING_FEN, Termination};
pub use piece_kind::PieceKind;
pub use rules::{Applied, Placement, Rules};
