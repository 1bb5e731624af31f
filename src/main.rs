// UCI front end
//
// Reads commands from stdin, drives the engine and prints responses on
// stdout. All chess knowledge lives in the library; this loop only
// parses, dispatches and formats.

use std::io::{self, BufRead};

use log::{error, warn};

use sable::engine::{Engine, DEFAULT_TABLE_SIZE_MB};

fn main() {
    env_logger::init();

    let mut engine = Engine::new(DEFAULT_TABLE_SIZE_MB);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.first() {
            Some(&"uci") => {
                println!("id name sable {}", env!("CARGO_PKG_VERSION"));
                println!("uciok");
            }
            Some(&"isready") => println!("readyok"),
            Some(&"ucinewgame") => engine.new_game(),
            Some(&"position") => position_command(&mut engine, &tokens),
            Some(&"go") => go_command(&mut engine, &tokens),
            Some(&"quit") => break,
            Some(_) => warn!("unknown command: {line}"),
            None => {}
        }
    }
}

/// `position startpos [moves ...]` or `position fen <fields> [moves ...]`
fn position_command(engine: &mut Engine, tokens: &[&str]) {
    let moves_at = tokens.iter().position(|&t| t == "moves");
    let moves: Vec<&str> = match moves_at {
        Some(i) => tokens[i + 1..].to_vec(),
        None => Vec::new(),
    };

    let result = match tokens.get(1) {
        Some(&"startpos") => engine.set_position("startpos", &moves),
        Some(&"fen") => {
            let end = moves_at.unwrap_or(tokens.len());
            let fen = tokens[2..end].join(" ");
            engine.set_position(&fen, &moves)
        }
        _ => {
            warn!("malformed position command: {}", tokens.join(" "));
            return;
        }
    };

    if let Err(err) = result {
        error!("position rejected: {err}");
    }
}

/// `go movetime <ms>` or `go wtime <ms> btime <ms> winc <ms> binc <ms>`
fn go_command(engine: &mut Engine, tokens: &[&str]) {
    let think_ms = if let Some(movetime) = token_value(tokens, "movetime") {
        // Leave a sliver for move transmission.
        movetime * 99 / 100
    } else {
        let wtime = token_value(tokens, "wtime").unwrap_or(0);
        let btime = token_value(tokens, "btime").unwrap_or(0);
        let winc = token_value(tokens, "winc").unwrap_or(0);
        let binc = token_value(tokens, "binc").unwrap_or(0);
        engine.choose_think_time(wtime, btime, winc, binc)
    };
    engine.set_search_time(think_ms);

    match engine.search() {
        Ok(best) => {
            println!("bestmove {}", best.uci());
            engine.play(best);
        }
        Err(err) => error!("search failed: {err}"),
    }
}

/// The numeric value following a named token, e.g. `wtime 30000`.
fn token_value(tokens: &[&str], name: &str) -> Option<u64> {
    let at = tokens.iter().position(|&t| t == name)?;
    tokens.get(at + 1)?.parse().ok()
}
