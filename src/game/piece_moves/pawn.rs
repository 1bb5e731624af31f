use crate::game::moves::{Move, MoveFlag, MoveList};
use crate::game::state::{in_board, GameState, WHITE};

impl GameState {
    pub(crate) fn pawn_moves(&mut self, rank: usize, file: usize, moves: &mut MoveList) {
        let team = self.player;
        let (ep_rank, ep_file) = self.en_passant();

        let forward: i32 = if team == WHITE { -1 } else { 1 };
        let start_rank: usize = if team == WHITE { 6 } else { 1 };
        let promotion_rank: i32 = if team == WHITE { 0 } else { 7 };
        let ep_target_rank: usize = if team == WHITE { 2 } else { 5 };

        let r = rank as i32;
        let f = file as i32;
        let one = r + forward;

        // A push or capture onto the last rank promotes; only the queen
        // promotion is generated.
        let flag = if one == promotion_rank {
            MoveFlag::Promotion
        } else {
            MoveFlag::None
        };

        if in_board(one, f) && self.board[one as usize][file] == 0 {
            self.push_if_legal(
                Move::new(rank, file, one as usize, file, flag, false),
                moves,
            );

            if rank == start_rank && self.board[(r + 2 * forward) as usize][file] == 0 {
                self.push_if_legal(
                    Move::new(
                        rank,
                        file,
                        (r + 2 * forward) as usize,
                        file,
                        MoveFlag::PawnTwoMoves,
                        false,
                    ),
                    moves,
                );
            }
        }

        for df in [-1, 1] {
            let tf = f + df;
            if in_board(one, tf) && self.board[one as usize][tf as usize] * team < 0 {
                self.push_if_legal(
                    Move::new(rank, file, one as usize, tf as usize, flag, true),
                    moves,
                );
            }
        }

        // (0, 0) means no en-passant target is set.
        if (ep_rank != 0 || ep_file != 0) && ep_rank == ep_target_rank {
            for df in [-1, 1] {
                if ep_rank as i32 == one && ep_file as i32 == f + df {
                    self.push_if_legal(
                        Move::new(rank, file, ep_rank, ep_file, MoveFlag::EnPassant, true),
                        moves,
                    );
                }
            }
        }
    }
}
