//! Console chess games against the engine or between two humans.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, info};

use ply_core::{ChessGame, Color, GameError, Rules};
use ply_engine::Searcher;

/// An interactive game: humans enter UCI moves, the engine answers for
/// its side if it has one.
pub struct Session {
    game: ChessGame,
    engine: Option<Color>,
    searcher: Searcher,
}

impl Session {
    /// Start a session where the engine plays `engine`, or nobody when `None`.
    pub fn new(game: ChessGame, engine: Option<Color>, depth: u8) -> Self {
        Self {
            game,
            engine,
            searcher: Searcher::new(depth),
        }
    }

    /// Play until the game ends or input runs out.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        info!(engine = ?self.engine, depth = self.searcher.depth(), "console game started");

        while self.game.outcome().is_none() {
            writeln!(output, "{}", self.game.pretty())?;

            if Some(self.game.side_to_move()) != self.engine {
                write!(output, "Enter your move (in UCI format, e.g., 'e2e4'): ")?;
                output.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    debug!("input closed, leaving game");
                    return Ok(());
                }
                match self.game.play_uci(line.trim()) {
                    Ok(_) => {}
                    Err(GameError::IllegalMove { .. }) => writeln!(output, "Illegal move. Try again.")?,
                    Err(_) => writeln!(output, "Invalid move format. Try again.")?,
                }
            } else {
                let result = self.searcher.search(&mut self.game)?;
                writeln!(output, "Engine plays {}", self.game.to_uci(result.best_move))?;
                self.game.apply(result.best_move);
            }
        }

        writeln!(output, "{}", self.game.pretty())?;
        writeln!(output, "Game over. Result: {}", self.game.result())?;
        output.flush()?;
        Ok(())
    }
}
