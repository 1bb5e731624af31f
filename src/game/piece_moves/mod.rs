// Pseudo-legal move generation, one file per piece
//
// Each generator appends candidate moves for a single piece to the shared
// buffer. Candidates are filtered through the legality check before being
// admitted, so callers only ever see legal moves.

mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;

use super::moves::{Move, MoveFlag, MoveList};
use super::state::{in_board, GameState};

impl GameState {
    /// Walks each direction until the board edge or the first occupied
    /// square, which is included iff it holds an enemy piece.
    pub(crate) fn sliding_moves(
        &mut self,
        rank: usize,
        file: usize,
        directions: &[(i32, i32)],
        moves: &mut MoveList,
    ) {
        let team = self.player;
        for &(dr, df) in directions {
            let (mut r, mut f) = (rank as i32 + dr, file as i32 + df);
            while in_board(r, f) {
                let target = self.board[r as usize][f as usize];
                if target * team > 0 {
                    break;
                }
                self.push_if_legal(
                    Move::new(rank, file, r as usize, f as usize, MoveFlag::None, target != 0),
                    moves,
                );
                if target * team < 0 {
                    break;
                }
                r += dr;
                f += df;
            }
        }
    }

    /// Shared by the king and knight generators: a fixed set of one-step
    /// offsets onto empty or enemy-occupied squares.
    pub(crate) fn offset_moves(
        &mut self,
        rank: usize,
        file: usize,
        offsets: &[(i32, i32); 8],
        moves: &mut MoveList,
    ) {
        let team = self.player;
        for &(dr, df) in offsets {
            let (r, f) = (rank as i32 + dr, file as i32 + df);
            if !in_board(r, f) {
                continue;
            }
            let target = self.board[r as usize][f as usize];
            if target * team <= 0 {
                self.push_if_legal(
                    Move::new(rank, file, r as usize, f as usize, MoveFlag::None, target != 0),
                    moves,
                );
            }
        }
    }
}

pub(crate) const ORTHOGONAL: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub(crate) const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
