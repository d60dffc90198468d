mod play;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ply_core::{ChessGame, Color};
use ply_engine::DEFAULT_DEPTH;
use ply_uci::UciEngine;

/// Fixed-depth negamax chess engine.
#[derive(Debug, Parser)]
#[command(name = "ply", version)]
struct Cli {
    /// Search depth in plies.
    #[arg(long, global = true, default_value_t = DEFAULT_DEPTH,
          value_parser = clap::value_parser!(u8).range(1..=10))]
    depth: u8,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Speak UCI on stdin/stdout (the default).
    Uci,
    /// Play a game against the engine in the terminal.
    Play {
        /// Side the human plays, or `both` for a game without the engine.
        #[arg(long, value_enum, default_value_t = Side::White)]
        human: Side,
        /// Start from this position instead of the initial one.
        #[arg(long)]
        fen: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
    /// Both sides are human; the engine does not move.
    Both,
}

impl Side {
    /// The side left to the engine.
    fn engine(self) -> Option<Color> {
        match self {
            Side::White => Some(Color::Black),
            Side::Black => Some(Color::White),
            Side::Both => None,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(depth = cli.depth, "ply starting");

    match cli.mode.unwrap_or(Mode::Uci) {
        Mode::Uci => UciEngine::new(cli.depth).run()?,
        Mode::Play { human, fen } => {
            let game = match fen {
                Some(fen) => ChessGame::from_fen(&fen)?,
                None => ChessGame::new(),
            };
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            play::Session::new(game, human.engine(), cli.depth).run(stdin.lock(), stdout.lock())?;
        }
    }
    Ok(())
}
