use super::{DIAGONAL, ORTHOGONAL};
use crate::game::moves::MoveList;
use crate::game::state::GameState;

impl GameState {
    pub(crate) fn queen_moves(&mut self, rank: usize, file: usize, moves: &mut MoveList) {
        self.sliding_moves(rank, file, &ORTHOGONAL, moves);
        self.sliding_moves(rank, file, &DIAGONAL, moves);
    }
}
