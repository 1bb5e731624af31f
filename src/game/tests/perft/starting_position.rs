use super::*;

#[test]
fn test_perft_starting_position_depth_1() {
    let mut state = GameState::new();
    assert_eq!(Perft::run(&mut state, 1).nodes, 20);
}

#[test]
fn test_perft_starting_position_depth_2() {
    let mut state = GameState::new();
    assert_eq!(Perft::run(&mut state, 2).nodes, 400);
}

#[test]
fn test_perft_starting_position_depth_3() {
    let mut state = GameState::new();
    let perft = Perft::run(&mut state, 3);
    assert_eq!(perft.nodes, 8902);
    assert_eq!(perft.captures, 34);
    assert_eq!(perft.en_passants, 0);
    assert_eq!(perft.checks, 12);
}

#[test]
fn test_perft_starting_position_depth_4() {
    let mut state = GameState::new();
    let perft = Perft::run(&mut state, 4);
    assert_eq!(perft.nodes, 197_281);
    assert_eq!(perft.captures, 1576);
    assert_eq!(perft.checks, 469);
}

#[test]
#[ignore = "slow; run with --ignored"]
fn test_perft_starting_position_depth_5() {
    let mut state = GameState::new();
    let perft = Perft::run(&mut state, 5);
    assert_eq!(perft.nodes, 4_865_609);
    assert_eq!(perft.captures, 82_719);
    assert_eq!(perft.en_passants, 258);
}

#[test]
fn test_perft_leaves_the_state_untouched() {
    let mut state = GameState::new();
    let snapshot = state.clone();
    Perft::run(&mut state, 3);
    assert_eq!(state, snapshot);
}
