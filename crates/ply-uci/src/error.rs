//! UCI protocol errors.

/// Errors that can occur during UCI protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// The `position` command is missing `startpos` or `fen` keyword.
    #[error("malformed position command: missing startpos or fen keyword")]
    MalformedPosition,

    /// Failed to parse a FEN string.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
    },

    /// A move in the `position` command is malformed or illegal.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The UCI move string that was rejected.
        uci_move: String,
    },

    /// A parameter keyword was not followed by a value.
    #[error("missing value for {param}")]
    MissingValue {
        /// The parameter keyword.
        param: String,
    },

    /// A parameter value could not be parsed.
    #[error("invalid value for {param}: {value}")]
    InvalidValue {
        /// The parameter keyword.
        param: String,
        /// The value that failed to parse.
        value: String,
    },

    /// `setoption` named an option the engine does not have.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name as given.
        name: String,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
