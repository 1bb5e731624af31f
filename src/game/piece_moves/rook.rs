use super::ORTHOGONAL;
use crate::game::moves::MoveList;
use crate::game::state::GameState;

impl GameState {
    pub(crate) fn rook_moves(&mut self, rank: usize, file: usize, moves: &mut MoveList) {
        self.sliding_moves(rank, file, &ORTHOGONAL, moves);
    }
}
