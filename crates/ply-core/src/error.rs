//! Error types for position setup and move input.

/// Errors raised while building a game or reading moves into it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The FEN string could not be parsed into a valid position.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The rejected FEN string.
        fen: String,
    },

    /// The text is not a UCI move (`e2e4`, `e7e8q`, ...).
    #[error("invalid move format: {uci_move}")]
    InvalidMove {
        /// The rejected move text.
        uci_move: String,
    },

    /// The move is well formed but not legal in the current position.
    #[error("illegal move: {uci_move}")]
    IllegalMove {
        /// The rejected move text.
        uci_move: String,
    },
}

#[cfg(test)]
mod tests {
    use super::GameError;

    #[test]
    fn display() {
        let err = GameError::IllegalMove { uci_move: "e2e5".to_string() };
        assert_eq!(err.to_string(), "illegal move: e2e5");
        let err = GameError::InvalidMove { uci_move: "zz".to_string() };
        assert_eq!(err.to_string(), "invalid move format: zz");
    }
}
