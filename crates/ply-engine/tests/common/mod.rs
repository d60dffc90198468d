//! Cutoff-free reference search shared by the integration tests.

#![allow(dead_code)]

use ply_core::Rules;
use ply_engine::{INF, LOSS, Terminal, classify, evaluate};

/// Full-width negamax with the same terminal handling and leaf evaluation
/// as the engine, but without any cutoff.
pub fn full_width<R: Rules>(rules: &mut R, depth: u8) -> i32 {
    match classify(rules) {
        Terminal::Lost => return LOSS,
        Terminal::Drawn => return 0,
        Terminal::Ongoing => {}
    }
    if depth == 0 {
        return evaluate(rules);
    }

    let mut best = -INF;
    for mv in rules.legal_moves() {
        rules.apply(mv);
        let eval = -full_width(rules, depth - 1);
        rules.undo();
        best = best.max(eval);
    }
    best
}

/// Root move an exhaustive search picks: first move with the strictly
/// highest score.
pub fn reference_best_move<R: Rules>(rules: &mut R, depth: u8) -> R::Move {
    let moves = rules.legal_moves();
    let mut best_move = moves[0];
    let mut best_eval = -INF;
    for mv in moves {
        rules.apply(mv);
        let eval = -full_width(rules, depth - 1);
        rules.undo();
        if eval > best_eval {
            best_eval = eval;
            best_move = mv;
        }
    }
    best_move
}
