use crate::game::moves::{Move, MoveFlag, MoveList};
use crate::game::state::{
    GameState, B_KING_SIDE, B_QUEEN_SIDE, WHITE, W_KING_SIDE, W_QUEEN_SIDE,
};

const KING_OFFSETS: [(i32, i32); 8] = [
    (1, -1), (1, 0), (1, 1), (-1, -1), (-1, 0), (-1, 1), (0, 1), (0, -1),
];

impl GameState {
    pub(crate) fn king_moves(&mut self, rank: usize, file: usize, moves: &mut MoveList) {
        self.offset_moves(rank, file, &KING_OFFSETS, moves);

        // Castling needs the right still held, the squares between king
        // and rook empty, and neither the king's square nor the square it
        // crosses attacked. The landing square is covered by the legality
        // filter like any other move; the rook is moved inside make_move.
        let team = self.player;
        let back_rank = if team == WHITE { 7 } else { 0 };
        let (king_side, queen_side) = if team == WHITE {
            (W_KING_SIDE, W_QUEEN_SIDE)
        } else {
            (B_KING_SIDE, B_QUEEN_SIDE)
        };

        if self.board[back_rank][1] == 0
            && self.board[back_rank][2] == 0
            && self.board[back_rank][3] == 0
            && self.can_castle(queen_side)
            && !self.is_attacked(back_rank, 3, team)
            && !self.is_attacked(rank, file, team)
        {
            self.push_if_legal(
                Move::new(rank, file, back_rank, 2, MoveFlag::Castling, false),
                moves,
            );
        }

        if self.board[back_rank][5] == 0
            && self.board[back_rank][6] == 0
            && self.can_castle(king_side)
            && !self.is_attacked(back_rank, 5, team)
            && !self.is_attacked(rank, file, team)
        {
            self.push_if_legal(
                Move::new(rank, file, back_rank, 6, MoveFlag::Castling, false),
                moves,
            );
        }
    }
}
