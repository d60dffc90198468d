//! Synchronous UCI engine loop.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use ply_core::ChessGame;
use ply_engine::{DEFAULT_DEPTH, INF, SearchError, Searcher};

use crate::command::{Command, GoParams, MAX_DEPTH, UciOption, parse_command};
use crate::error::UciError;

/// Render a search score as the `score` field of an `info` line.
///
/// Material is reported in centipawns. Forced wins and losses become
/// `mate N`; the search scores every mate alike, so `N` is the longest
/// distance in moves that fits in `depth` plies.
fn score_field(score: i32, depth: u8) -> String {
    let depth = i32::from(depth);
    if score >= INF {
        format!("mate {}", (depth + 1) / 2)
    } else if score <= -INF {
        format!("mate -{}", (depth / 2).max(1))
    } else {
        format!("cp {}", score * 100)
    }
}

/// The UCI engine, holding the current game and search configuration.
///
/// Searches run to completion on the calling thread before the next
/// command is read, so `stop` has nothing to interrupt.
pub struct UciEngine {
    game: ChessGame,
    searcher: Searcher,
}

impl UciEngine {
    /// Create a new engine at the starting position searching `depth` plies.
    pub fn new(depth: u8) -> Self {
        Self {
            game: ChessGame::new(),
            searcher: Searcher::new(depth),
        }
    }

    /// Configured search depth.
    pub fn depth(&self) -> u8 {
        self.searcher.depth()
    }

    /// Run the UCI loop on stdin and stdout until `quit` or input closes.
    pub fn run(&mut self) -> Result<(), UciError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the UCI loop over arbitrary input and output streams.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), UciError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received UCI command");

            match parse_command(trimmed) {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.handle(cmd, &mut output)?,
                Err(e) => warn!(error = %e, "UCI parse error"),
            }
            output.flush()?;
        }

        info!("ply shutting down");
        Ok(())
    }

    fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<()> {
        match cmd {
            Command::Uci => self.handle_uci(out),
            Command::IsReady => writeln!(out, "readyok"),
            Command::UciNewGame => {
                self.game = ChessGame::new();
                Ok(())
            }
            Command::Position(game) => {
                self.game = game;
                Ok(())
            }
            Command::Go(params) => self.handle_go(params, out),
            Command::SetOption(opt) => {
                self.handle_setoption(opt);
                Ok(())
            }
            Command::Display => writeln!(out, "{}", self.game.pretty()),
            Command::Stop | Command::Quit | Command::Unknown(_) => Ok(()),
        }
    }

    fn handle_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name ply")?;
        writeln!(out, "id author the ply developers")?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max {}",
            DEFAULT_DEPTH, MAX_DEPTH
        )?;
        writeln!(out, "uciok")
    }

    fn handle_setoption(&mut self, option: UciOption) {
        match option {
            UciOption::Depth(depth) => {
                debug!(depth, "search depth set");
                self.searcher.set_depth(depth);
            }
        }
    }

    fn handle_go<W: Write>(&mut self, params: GoParams, out: &mut W) -> io::Result<()> {
        let depth = params.depth.unwrap_or(self.searcher.depth());

        match Searcher::new(depth).search(&mut self.game) {
            Ok(result) => {
                if let Some(score) = result.score {
                    writeln!(
                        out,
                        "info depth {} score {} nodes {}",
                        result.depth,
                        score_field(score, result.depth),
                        result.nodes
                    )?;
                }
                writeln!(out, "bestmove {}", self.game.to_uci(result.best_move))
            }
            Err(SearchError::NoLegalMoves) => writeln!(out, "bestmove 0000"),
            Err(e) => {
                warn!(error = %e, depth, "search rejected");
                writeln!(out, "bestmove 0000")
            }
        }
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
