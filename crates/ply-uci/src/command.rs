//! UCI command parsing.

use ply_core::{ChessGame, GameError};

use crate::error::UciError;

/// Deepest search accepted from the GUI.
pub const MAX_DEPTH: u8 = 10;

/// Parameters for the `go` command.
///
/// Only a fixed depth is honoured; clock parameters are accepted and
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Search to this depth instead of the configured one.
    pub depth: Option<u8>,
}

/// Options settable with `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOption {
    /// Default search depth in plies.
    Depth(u8),
}

/// A parsed UCI command.
#[derive(Debug)]
pub enum Command {
    /// `uci` -- identify the engine.
    Uci,
    /// `isready` -- synchronization ping.
    IsReady,
    /// `ucinewgame` -- reset engine state.
    UciNewGame,
    /// `position` -- set up a game with optional moves applied.
    Position(ChessGame),
    /// `go` -- search the current position.
    Go(GoParams),
    /// `setoption name <id> value <x>`.
    SetOption(UciOption),
    /// `d` -- print the current board.
    Display,
    /// `stop` -- halt the current search.
    Stop,
    /// `quit` -- exit the engine.
    Quit,
    /// Unrecognized command (ignored, as UCI requires).
    Unknown(String),
}

/// Parse a single line of UCI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, UciError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Command::Unknown(String::new()));
    }

    match tokens[0] {
        "uci" => Ok(Command::Uci),
        "isready" => Ok(Command::IsReady),
        "ucinewgame" => Ok(Command::UciNewGame),
        "stop" => Ok(Command::Stop),
        "quit" => Ok(Command::Quit),
        "d" => Ok(Command::Display),
        "position" => parse_position(&tokens[1..]),
        "go" => parse_go(&tokens[1..]),
        "setoption" => parse_setoption(&tokens[1..]),
        _ => Ok(Command::Unknown(tokens[0].to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Supports:
/// - `position startpos [moves e2e4 d7d5 ...]`
/// - `position fen <fen-string> [moves e2e4 d7d5 ...]`
///
/// Moves are played into the game so repetitions stay visible to the search.
fn parse_position(tokens: &[&str]) -> Result<Command, UciError> {
    if tokens.is_empty() {
        return Err(UciError::MalformedPosition);
    }

    let (mut game, rest) = if tokens[0] == "startpos" {
        (ChessGame::new(), &tokens[1..])
    } else if tokens[0] == "fen" {
        // FEN is 6 space-separated fields
        if tokens.len() < 7 {
            return Err(UciError::InvalidFen {
                fen: tokens[1..].join(" "),
            });
        }
        let fen = tokens[1..7].join(" ");
        let game = ChessGame::from_fen(&fen).map_err(|_| UciError::InvalidFen { fen: fen.clone() })?;
        (game, &tokens[7..])
    } else {
        return Err(UciError::MalformedPosition);
    };

    if rest.first() == Some(&"moves") {
        for uci_str in &rest[1..] {
            game.play_uci(uci_str).map_err(|e| match e {
                GameError::InvalidMove { uci_move } | GameError::IllegalMove { uci_move } => {
                    UciError::InvalidMove { uci_move }
                }
                GameError::InvalidFen { fen } => UciError::InvalidFen { fen },
            })?;
        }
    }

    Ok(Command::Position(game))
}

/// Parse the `go` command arguments. Unknown tokens are silently skipped.
fn parse_go(tokens: &[&str]) -> Result<Command, UciError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                params.depth = Some(parse_depth(tokens.get(i + 1), "depth")?);
                i += 2;
            }
            _ => {
                // Clock and node limits are not used by a fixed-depth search
                i += 1;
            }
        }
    }

    Ok(Command::Go(params))
}

/// Parse `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Result<Command, UciError> {
    if tokens.first() != Some(&"name") {
        return Err(UciError::MissingValue {
            param: "name".to_string(),
        });
    }
    let value_at = tokens.iter().position(|t| *t == "value");
    let name = tokens[1..value_at.unwrap_or(tokens.len())].join(" ");

    match name.to_ascii_lowercase().as_str() {
        "depth" => {
            let value = value_at.and_then(|i| tokens.get(i + 1));
            Ok(Command::SetOption(UciOption::Depth(parse_depth(value, "Depth")?)))
        }
        _ => Err(UciError::UnknownOption { name }),
    }
}

/// Parse a depth in `1..=MAX_DEPTH`.
fn parse_depth(token: Option<&&str>, param: &str) -> Result<u8, UciError> {
    let value = token.ok_or_else(|| UciError::MissingValue {
        param: param.to_string(),
    })?;
    let invalid = || UciError::InvalidValue {
        param: param.to_string(),
        value: value.to_string(),
    };
    let depth: u8 = value.parse().map_err(|_| invalid())?;
    if depth == 0 || depth > MAX_DEPTH {
        return Err(invalid());
    }
    Ok(depth)
}
