use super::DIAGONAL;
use crate::game::moves::MoveList;
use crate::game::state::GameState;

impl GameState {
    pub(crate) fn bishop_moves(&mut self, rank: usize, file: usize, moves: &mut MoveList) {
        self.sliding_moves(rank, file, &DIAGONAL, moves);
    }
}
