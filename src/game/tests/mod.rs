use super::*;

// ==================== HELPER FUNCTIONS ====================

/// Parses a FEN that the test knows to be valid.
pub fn fen(text: &str) -> GameState {
    GameState::from_fen(text).expect("test FEN must parse")
}

/// Applies a sequence of coordinate moves like `e2e4`, resolving each
/// against the legal move list so flags are attached correctly.
pub fn play_moves(state: &mut GameState, moves: &[&str]) {
    for text in moves {
        let bytes = text.as_bytes();
        let from = square(bytes[0], bytes[1]);
        let to = square(bytes[2], bytes[3]);
        let m = state
            .find_move(from, to)
            .unwrap_or_else(|| panic!("move {text} must be legal"));
        state.make_move(m);
    }
}

/// Board coordinates of a square like `e4`.
pub fn square(file: u8, rank: u8) -> (usize, usize) {
    (8 - (rank - b'0') as usize, (file - b'a') as usize)
}

/// Whether the list contains a move between the given squares.
pub fn has_move(moves: &[Move], from: (usize, usize), to: (usize, usize)) -> bool {
    moves.iter().any(|m| {
        (m.from_rank(), m.from_file()) == from && (m.to_rank(), m.to_file()) == to
    })
}

// ==================== TEST MODULES ====================

mod perft;
mod promotion;
