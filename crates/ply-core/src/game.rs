//! Standard chess over a single mutable position, with move history.

use std::fmt;

use cozy_chess::{BitBoard, Board, File, Move, Piece, Square};
use tracing::debug;

use crate::color::Color;
use crate::error::GameError;
use crate::piece_kind::PieceKind;
use crate::rules::{Placement, Rules};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// a1, c1, e1, ... (the squares with even file + rank).
const DARK_SQUARES: BitBoard = BitBoard(0xAA55_AA55_AA55_AA55);

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The side to move is in check with no legal moves.
    Checkmate,
    /// The side to move has no legal moves and is not in check.
    Stalemate,
    /// Neither side has enough material left to mate.
    InsufficientMaterial,
    /// 150 half-moves without a capture or pawn move.
    SeventyFiveMoves,
    /// The same position occurred five times.
    FivefoldRepetition,
}

/// Final state of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// How the game ended.
    pub termination: Termination,
    /// Winning side, `None` for a draw.
    pub winner: Option<Color>,
}

impl Outcome {
    /// PGN-style result: `1-0`, `0-1` or `1/2-1/2`.
    pub fn result(&self) -> &'static str {
        match self.winner {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

/// A chess game: the current position plus everything needed to undo
/// moves and detect repetitions.
#[derive(Clone)]
pub struct ChessGame {
    board: Board,
    /// Half-moves since the last capture or pawn move. Tracked here rather
    /// than read from the board so it can run past 100.
    clock: u16,
    /// Position and clock before each played move, oldest first.
    undo_stack: Vec<(Board, u16)>,
    moves: Vec<Move>,
}

impl ChessGame {
    /// A new game from the standard starting position.
    pub fn new() -> Self {
        Self {
            board: Board::default(),
            clock: 0,
            undo_stack: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// A new game starting from a FEN position. Earlier history is unknown.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let board = Board::from_fen(fen.trim(), false).map_err(|_| {
            debug!(fen, "rejected FEN");
            GameError::InvalidFen {
                fen: fen.to_string(),
            }
        })?;
        Ok(Self {
            clock: u16::from(board.halfmove_clock()),
            board,
            undo_stack: Vec::new(),
            moves: Vec::new(),
        })
    }

    /// The current position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves played since the game was created, oldest first.
    pub fn moves_played(&self) -> &[Move] {
        &self.moves
    }

    /// Render `mv` as standard UCI text (`e1g1` for short castling).
    ///
    /// `mv` must be legal in the current position.
    pub fn to_uci(&self, mv: Move) -> String {
        uci_text(&self.board, mv)
    }

    /// Resolve UCI text against the legal moves of the current position.
    pub fn parse_uci(&self, text: &str) -> Result<Move, GameError> {
        let text = text.trim();
        if text.parse::<Move>().is_err() {
            return Err(GameError::InvalidMove {
                uci_move: text.to_string(),
            });
        }
        self.legal_moves()
            .into_iter()
            .find(|&mv| uci_text(&self.board, mv) == text)
            .ok_or_else(|| GameError::IllegalMove {
                uci_move: text.to_string(),
            })
    }

    /// Parse and play a UCI move.
    pub fn play_uci(&mut self, text: &str) -> Result<Move, GameError> {
        let mv = self.parse_uci(text)?;
        self.apply(mv);
        Ok(mv)
    }

    /// The finished-game state, or `None` while play continues.
    ///
    /// Claimable draws do not end the game on their own; only the
    /// automatic rules are reported here.
    pub fn outcome(&self) -> Option<Outcome> {
        let stm = Color::from(self.board.side_to_move());
        let (termination, winner) = if self.is_checkmate() {
            (Termination::Checkmate, Some(!stm))
        } else if self.is_stalemate() {
            (Termination::Stalemate, None)
        } else if self.is_insufficient_material() {
            (Termination::InsufficientMaterial, None)
        } else if self.clock >= 150 {
            (Termination::SeventyFiveMoves, None)
        } else if self.occurrences(self.board.hash(), usize::from(self.clock)) >= 5 {
            (Termination::FivefoldRepetition, None)
        } else {
            return None;
        };
        Some(Outcome { termination, winner })
    }

    /// PGN-style result, `*` while the game is in progress.
    pub fn result(&self) -> &'static str {
        self.outcome().map_or("*", |outcome| outcome.result())
    }

    /// An 8x8 text diagram of the current position.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(&self.board)
    }

    fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|_| true)
    }

    /// How often a position with `hash` has occurred, counting one
    /// occurrence for the position itself and looking back over at most
    /// `window` earlier plies of the recorded history.
    fn occurrences(&self, hash: u64, window: usize) -> usize {
        1 + self
            .undo_stack
            .iter()
            .rev()
            .take(window)
            .filter(|(board, _)| board.hash() == hash)
            .count()
    }

    /// Whether `mv` resets the half-move clock.
    fn is_zeroing(&self, mv: Move) -> bool {
        self.board.piece_on(mv.from) == Some(Piece::Pawn)
            || self.board.color_on(mv.to) == Some(!self.board.side_to_move())
    }

    /// Occurrences of the position reached by playing `mv`, including the
    /// current board as one of the earlier positions.
    fn occurrences_after(&self, mv: Move) -> usize {
        if self.is_zeroing(mv) {
            return 1;
        }
        let mut child = self.board.clone();
        child.play_unchecked(mv);
        let current = usize::from(self.board.hash() == child.hash());
        current + self.occurrences(child.hash(), usize::from(self.clock))
    }

    fn can_claim_fifty_moves(&self) -> bool {
        if self.clock >= 100 {
            return self.has_legal_moves();
        }
        if self.clock == 99 {
            return self
                .legal_moves()
                .into_iter()
                .any(|mv| !self.is_zeroing(mv));
        }
        false
    }

    fn can_claim_threefold(&self) -> bool {
        let window = usize::from(self.clock);
        if self.occurrences(self.board.hash(), window) >= 3 {
            return true;
        }
        self.legal_moves()
            .into_iter()
            .any(|mv| self.occurrences_after(mv) >= 3)
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChessGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChessGame")
            .field("board", &format_args!("{}", self.board))
            .field("plies", &self.moves.len())
            .finish()
    }
}

impl Rules for ChessGame {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    fn apply(&mut self, mv: Move) {
        let zeroing = self.is_zeroing(mv);
        self.undo_stack.push((self.board.clone(), self.clock));
        self.board.play_unchecked(mv);
        self.clock = if zeroing { 0 } else { self.clock.saturating_add(1) };
        self.moves.push(mv);
    }

    /// # Panics
    ///
    /// Panics if no move has been applied.
    fn undo(&mut self) {
        let Some((previous, clock)) = self.undo_stack.pop() else {
            panic!("undo called without a matching apply");
        };
        self.board = previous;
        self.clock = clock;
        self.moves.pop();
    }

    fn is_checkmate(&self) -> bool {
        !self.board.checkers().is_empty() && !self.has_legal_moves()
    }

    fn is_stalemate(&self) -> bool {
        self.board.checkers().is_empty() && !self.has_legal_moves()
    }

    fn is_insufficient_material(&self) -> bool {
        [cozy_chess::Color::White, cozy_chess::Color::Black]
            .into_iter()
            .all(|color| has_insufficient_material(&self.board, color))
    }

    fn can_claim_draw(&self) -> bool {
        self.can_claim_fifty_moves() || self.can_claim_threefold()
    }

    fn piece_placement(&self) -> Vec<Placement> {
        self.board
            .occupied()
            .into_iter()
            .filter_map(|sq| {
                let kind = self.board.piece_on(sq)?;
                let color = self.board.color_on(sq)?;
                Some(Placement {
                    square: sq as u8,
                    kind: PieceKind::from(kind),
                    color: Color::from(color),
                })
            })
            .collect()
    }

    fn side_to_move(&self) -> Color {
        Color::from(self.board.side_to_move())
    }
}

/// Whether `color` can no longer mate under any sequence of moves.
fn has_insufficient_material(board: &Board, color: cozy_chess::Color) -> bool {
    let ours = board.colors(color);
    let pawns = board.pieces(Piece::Pawn);
    let knights = board.pieces(Piece::Knight);
    let bishops = board.pieces(Piece::Bishop);

    if !(ours & (pawns | board.pieces(Piece::Rook) | board.pieces(Piece::Queen))).is_empty() {
        return false;
    }

    if !(ours & knights).is_empty() {
        // A lone knight mates only with help from something other than a queen.
        let helpers =
            board.colors(!color) & !board.pieces(Piece::King) & !board.pieces(Piece::Queen);
        return ours.len() <= 2 && helpers.is_empty();
    }

    if !(ours & bishops).is_empty() {
        let one_square_color =
            (bishops & DARK_SQUARES).is_empty() || (bishops & !DARK_SQUARES).is_empty();
        return one_square_color && pawns.is_empty() && knights.is_empty();
    }

    true
}

/// UCI text for `mv` in `board`, mapping king-takes-rook castling to the
/// king's destination square.
fn uci_text(board: &Board, mv: Move) -> String {
    let castles = board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == Some(board.side_to_move());
    if !castles {
        return mv.to_string();
    }
    let file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
        File::G
    } else {
        File::C
    };
    Move {
        to: Square::new(file, mv.from.rank()),
        ..mv
    }
    .to_string()
}

/// Wrapper for pretty-printing a position as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank_idx in (0..8usize).rev() {
            write!(f, "{}  ", rank_idx + 1)?;
            for file_idx in 0..8usize {
                let sq = Square::index(rank_idx * 8 + file_idx);
                let c = match (board.piece_on(sq), board.color_on(sq)) {
                    (Some(piece), Some(color)) => {
                        let c = PieceKind::from(piece).fen_char();
                        if color == cozy_chess::Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        }
                    }
                    _ => '.',
                };
                if file_idx < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
