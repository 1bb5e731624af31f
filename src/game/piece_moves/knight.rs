use crate::game::moves::MoveList;
use crate::game::state::GameState;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, 1), (-1, 2), (-2, -1), (-1, -2), (1, -2), (1, 2), (2, -1), (2, 1),
];

impl GameState {
    pub(crate) fn knight_moves(&mut self, rank: usize, file: usize, moves: &mut MoveList) {
        self.offset_moves(rank, file, &KNIGHT_OFFSETS, moves);
    }
}
