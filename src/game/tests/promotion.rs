use super::*;

#[test]
fn test_promotion_push_and_unmake() {
    let mut state = fen("8/P7/8/8/8/8/8/k6K w - - 0 1");
    let snapshot = state.clone();

    let promotion = state
        .find_move(square(b'a', b'7'), square(b'a', b'8'))
        .expect("a7a8 is legal");
    assert!(promotion.is_promotion());

    state.make_move(promotion);
    assert_eq!(state.board[0][0], QUEEN, "a8 holds a white queen");
    assert_eq!(state.board[1][0], 0);

    state.unmake_move(promotion);
    assert_eq!(state.board[1][0], PAWN, "pawn restored on a7");
    assert_eq!(state.board[0][0], 0);
    assert_eq!(state, snapshot);
}

#[test]
fn test_only_the_queen_promotion_is_generated() {
    let mut state = fen("8/P7/8/8/8/8/8/k6K w - - 0 1");
    let moves = state.generate_moves();
    let promotions: Vec<&Move> = moves.iter().filter(|m| m.is_promotion()).collect();
    assert_eq!(promotions.len(), 1, "underpromotions are not generated");
}

#[test]
fn test_capture_promotion() {
    let mut state = fen("1r6/P7/8/8/8/8/8/k6K w - - 0 1");
    let snapshot = state.clone();

    let capture = state
        .find_move(square(b'a', b'7'), square(b'b', b'8'))
        .expect("axb8 is legal");
    assert!(capture.is_promotion());
    assert!(capture.is_capture());

    state.make_move(capture);
    assert_eq!(state.board[0][1], QUEEN);

    state.unmake_move(capture);
    assert_eq!(state.board[0][1], -ROOK, "captured rook restored");
    assert_eq!(state, snapshot);
}

#[test]
fn test_black_promotion() {
    let mut state = fen("k6K/8/8/8/8/8/p7/8 b - - 0 1");
    let promotion = state
        .find_move(square(b'a', b'2'), square(b'a', b'1'))
        .expect("a2a1 is legal");
    assert!(promotion.is_promotion());

    state.make_move(promotion);
    assert_eq!(state.board[7][0], -QUEEN, "a1 holds a black queen");
}

#[test]
fn test_blocked_pawn_does_not_promote() {
    let mut state = fen("R7/P7/8/8/8/8/8/k6K w - - 0 1");
    let moves = state.generate_moves();
    assert!(!has_move(&moves, (1, 0), (0, 0)), "a8 is occupied by a friendly rook");
}
