//! Full UCI sessions driven through in-memory streams.

use std::io::Cursor;

use ply_uci::UciEngine;

fn run(engine: &mut UciEngine, script: &str) -> Vec<String> {
    let mut output = Vec::new();
    engine.run_with(Cursor::new(script), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn bestmove(lines: &[String]) -> &str {
    lines
        .iter()
        .rev()
        .find_map(|l| l.strip_prefix("bestmove "))
        .expect("no bestmove line")
}

#[test]
fn handshake() {
    let lines = run(&mut UciEngine::default(), "uci\nisready\nquit\n");
    assert_eq!(lines[0], "id name ply");
    assert!(lines.iter().any(|l| l.starts_with("option name Depth type spin")));
    assert!(lines.contains(&"uciok".to_string()));
    assert_eq!(lines.last().unwrap(), "readyok");
}

#[test]
fn go_from_start_reports_info_then_bestmove() {
    let lines = run(&mut UciEngine::default(), "position startpos\ngo depth 2\n");
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("info depth 2 score cp "));
    assert!(lines[0].contains(" nodes "));
    assert_eq!(bestmove(&lines).len(), 4);
}

#[test]
fn finds_mate_after_moves() {
    let script = "position startpos moves e2e4 e7e5 f1c4 b8c6 d1h5 g8f6\ngo depth 2\n";
    let lines = run(&mut UciEngine::default(), script);
    assert_eq!(bestmove(&lines), "h5f7");
    assert!(lines[0].contains("score mate 1 "));
}

#[test]
fn no_legal_moves_gives_null_move() {
    let lines = run(
        &mut UciEngine::default(),
        "position fen k7/2K5/1Q6/8/8/8/8/8 b - - 0 1\ngo\n",
    );
    assert_eq!(lines, vec!["bestmove 0000".to_string()]);
}

#[test]
fn forced_move_skips_info_line() {
    let lines = run(
        &mut UciEngine::default(),
        "position fen r6k/8/8/8/8/8/7r/K7 w - - 0 1\ngo depth 3\n",
    );
    assert_eq!(lines, vec!["bestmove a1b1".to_string()]);
}

#[test]
fn setoption_changes_default_depth() {
    let mut engine = UciEngine::default();
    let lines = run(&mut engine, "setoption name Depth value 1\nposition startpos\ngo\n");
    assert_eq!(engine.depth(), 1);
    assert!(lines[0].starts_with("info depth 1 "));
}

#[test]
fn castling_move_in_position_is_applied() {
    let lines = run(
        &mut UciEngine::default(),
        "position fen r3k3/8/8/8/8/8/8/4K3 b q - 0 1 moves e8c8\nd\n",
    );
    assert_eq!(lines[0], "8  . . k r . . . .");
    assert_eq!(lines[8], "   a b c d e f g h");
}

#[test]
fn bad_commands_are_skipped() {
    let script = "position fen garbage\nposition startpos moves e2e5\nsetoption name Hash value 1\nfoo\nisready\n";
    let lines = run(&mut UciEngine::default(), script);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn ucinewgame_resets_position() {
    let mut engine = UciEngine::new(1);
    let script = "position fen k7/2K5/1Q6/8/8/8/8/8 b - - 0 1\nucinewgame\ngo\n";
    let lines = run(&mut engine, script);
    assert_ne!(bestmove(&lines), "0000");
}

#[test]
fn quit_stops_reading() {
    let lines = run(&mut UciEngine::default(), "quit\nisready\n");
    assert!(lines.is_empty());
}
