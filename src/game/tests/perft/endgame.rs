use super::*;

// A sparse rook endgame built around pinned pawns and en-passant traps.
const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";

#[test]
fn test_perft_endgame_depth_1() {
    let mut state = fen(ENDGAME);
    let perft = Perft::run(&mut state, 1);
    assert_eq!(perft.nodes, 14);
    assert_eq!(perft.captures, 1);
    assert_eq!(perft.checks, 2);
}

#[test]
fn test_perft_endgame_depth_2() {
    let mut state = fen(ENDGAME);
    let perft = Perft::run(&mut state, 2);
    assert_eq!(perft.nodes, 191);
    assert_eq!(perft.captures, 14);
    assert_eq!(perft.checks, 10);
}

#[test]
fn test_perft_endgame_depth_3() {
    let mut state = fen(ENDGAME);
    let perft = Perft::run(&mut state, 3);
    assert_eq!(perft.nodes, 2812);
    assert_eq!(perft.captures, 209);
    assert_eq!(perft.en_passants, 2);
    assert_eq!(perft.checks, 267);
}

#[test]
fn test_perft_endgame_depth_4() {
    let mut state = fen(ENDGAME);
    let perft = Perft::run(&mut state, 4);
    assert_eq!(perft.nodes, 43_238);
    assert_eq!(perft.captures, 3348);
    assert_eq!(perft.en_passants, 123);
    assert_eq!(perft.checks, 1680);
}

#[test]
fn test_perft_endgame_depth_5() {
    let mut state = fen(ENDGAME);
    let perft = Perft::run(&mut state, 5);
    assert_eq!(perft.nodes, 674_624);
    assert_eq!(perft.captures, 52_051);
    assert_eq!(perft.en_passants, 1165);
    assert_eq!(perft.castles, 0);
    assert_eq!(perft.promotions, 0);
}
