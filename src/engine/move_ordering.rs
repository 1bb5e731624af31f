// Move ordering
//
// Searching promising moves first lets alpha-beta prune far more of the
// tree, and the effect is largest in quiescence where almost every move
// is a capture. Captures are ranked by MVV-LVA (most valuable victim,
// least valuable aggressor) and promotions get the mover's worth on top.

use std::cmp::Reverse;

use crate::game::{Move, MoveList, PAWN};

/// Relative piece worth used only for ordering, indexed by magnitude:
/// king, queen, rook, knight, bishop, pawn.
const PIECE_ORDER_VALUE: [i32; 7] = [0, 0, 9, 5, 3, 3, 1];

/// Sorts the buffer so the most promising moves come first. The ordering
/// score is transient: it lives in the sort's key cache, not on the move.
pub fn sort_moves(moves: &mut MoveList, board: &[[i8; 8]; 8]) {
    moves.sort_by_cached_key(|&m| Reverse(score_move(m, board)));
}

fn score_move(m: Move, board: &[[i8; 8]; 8]) -> i32 {
    let attacker = board[m.from_rank()][m.from_file()].unsigned_abs() as usize;
    // The en-passant target square is empty; the victim is still a pawn.
    let victim = if m.is_en_passant() {
        PAWN as usize
    } else {
        board[m.to_rank()][m.to_file()].unsigned_abs() as usize
    };

    let mut score = 0;
    if m.is_capture() {
        score = 10 * PIECE_ORDER_VALUE[victim] - PIECE_ORDER_VALUE[attacker];
    }
    if m.is_promotion() {
        score += PIECE_ORDER_VALUE[attacker];
    }
    score
}
