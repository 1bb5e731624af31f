// Game state representation and the rules of chess
//
// The board is an 8x8 array of signed piece codes: magnitudes 1..6 are
// king, queen, rook, knight, bishop and pawn, the sign is the color
// (positive white, negative black) and zero is an empty square. The sign
// convention makes attack detection and evaluation read naturally as
// `board[rank][file] * team`.
//
// All reversible per-move state (castling rights, en-passant target,
// captured piece) is packed into a 16-bit word that is pushed onto a
// history stack by `make_move` and popped by `unmake_move`, so a
// make/unmake pair restores the position bit-exactly.

use thiserror::Error;

use super::moves::{Move, MoveList};
use super::zobrist::ZOBRIST;

pub const KING: i8 = 1;
pub const QUEEN: i8 = 2;
pub const ROOK: i8 = 3;
pub const KNIGHT: i8 = 4;
pub const BISHOP: i8 = 5;
pub const PAWN: i8 = 6;

pub const WHITE: i8 = 1;
pub const BLACK: i8 = -1;

// The low four bits of the game-state word are the castling rights.
// |1|  |1|  |1|  |1|
// BQ   BK   WQ   WK
pub const W_KING_SIDE: u16 = 1;
pub const W_QUEEN_SIDE: u16 = 2;
pub const B_KING_SIDE: u16 = 4;
pub const B_QUEEN_SIDE: u16 = 8;

// Bits 4..6 hold the en-passant target rank, bits 7..9 its file, bits
// 10..12 the magnitude of the last captured piece and bit 13 its color.
const EN_PASSANT_MASK: u16 = 63 << 4;
const CAPTURED_MASK: u16 = 15 << 10;

// History stacks never reallocate during a search: main depth plus the
// quiescence extension bounds the path length.
const HISTORY_CAPACITY: usize = 255 + 33;

/// Errors produced while installing a FEN position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN is missing the {0} field")]
    MissingField(&'static str),
    #[error("invalid piece character '{0}' in the board field")]
    InvalidPiece(char),
    #[error("board field does not describe 8 ranks of 8 files")]
    BadBoardShape,
    #[error("invalid side-to-move field '{0}'")]
    InvalidSideToMove(String),
    #[error("invalid en-passant field '{0}'")]
    InvalidEnPassant(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: [[i8; 8]; 8],
    /// Side to move: `WHITE` or `BLACK`.
    pub player: i8,
    pub white_king: (usize, usize),
    pub black_king: (usize, usize),
    /// Packed castling rights, en-passant target and last captured piece.
    pub current_game_state: u16,
    game_state_history: Vec<u16>,
    pub zobrist_key: u64,
    zobrist_history: Vec<u64>,
}

/// Checks whether a coordinate pair lies on the board.
#[inline]
pub fn in_board(rank: i32, file: i32) -> bool {
    (0..8).contains(&rank) && (0..8).contains(&file)
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard opening position, White to move, all castling rights.
    pub fn new() -> GameState {
        const BACK_RANK: [i8; 8] = [ROOK, KNIGHT, BISHOP, QUEEN, KING, BISHOP, KNIGHT, ROOK];

        let mut board = [[0i8; 8]; 8];
        for file in 0..8 {
            board[0][file] = -BACK_RANK[file];
            board[1][file] = -PAWN;
            board[6][file] = PAWN;
            board[7][file] = BACK_RANK[file];
        }

        let mut state = GameState {
            board,
            player: WHITE,
            white_king: (7, 4),
            black_king: (0, 4),
            current_game_state: W_KING_SIDE | W_QUEEN_SIDE | B_KING_SIDE | B_QUEEN_SIDE,
            game_state_history: Vec::with_capacity(HISTORY_CAPACITY),
            zobrist_key: 0,
            zobrist_history: Vec::with_capacity(HISTORY_CAPACITY),
        };
        state.zobrist_key = ZOBRIST.compute_full(&state.board);
        state
    }

    /// Installs a position from the first four FEN fields. The half-move
    /// and full-move counters are accepted but not stored.
    pub fn from_fen(fen: &str) -> Result<GameState, FenError> {
        let mut fields = fen.split_whitespace();
        let board_field = fields.next().ok_or(FenError::MissingField("board"))?;
        let player_field = fields.next().ok_or(FenError::MissingField("side to move"))?;
        let castling_field = fields.next().ok_or(FenError::MissingField("castling"))?;
        let en_passant_field = fields.next().ok_or(FenError::MissingField("en passant"))?;

        let mut board = [[0i8; 8]; 8];
        let mut white_king = None;
        let mut black_king = None;

        let mut rank = 0usize;
        let mut file = 0usize;
        for c in board_field.chars() {
            match c {
                '/' => {
                    if file != 8 || rank >= 7 {
                        return Err(FenError::BadBoardShape);
                    }
                    rank += 1;
                    file = 0;
                }
                '1'..='8' => {
                    file += c as usize - '0' as usize;
                    if file > 8 {
                        return Err(FenError::BadBoardShape);
                    }
                }
                _ => {
                    if file >= 8 {
                        return Err(FenError::BadBoardShape);
                    }
                    let magnitude = match c.to_ascii_uppercase() {
                        'K' => KING,
                        'Q' => QUEEN,
                        'R' => ROOK,
                        'N' => KNIGHT,
                        'B' => BISHOP,
                        'P' => PAWN,
                        _ => return Err(FenError::InvalidPiece(c)),
                    };
                    if magnitude == KING {
                        if c.is_ascii_uppercase() {
                            white_king = Some((rank, file));
                        } else {
                            black_king = Some((rank, file));
                        }
                    }
                    board[rank][file] = if c.is_ascii_uppercase() { magnitude } else { -magnitude };
                    file += 1;
                }
            }
        }
        if rank != 7 || file != 8 {
            return Err(FenError::BadBoardShape);
        }

        let player = match player_field {
            "w" => WHITE,
            "b" => BLACK,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        let mut current_game_state = 0u16;
        for c in castling_field.chars() {
            match c {
                'K' => current_game_state |= W_KING_SIDE,
                'Q' => current_game_state |= W_QUEEN_SIDE,
                'k' => current_game_state |= B_KING_SIDE,
                'q' => current_game_state |= B_QUEEN_SIDE,
                '-' => {}
                _ => {}
            }
        }

        if en_passant_field != "-" {
            let mut chars = en_passant_field.chars();
            let (file_char, rank_char) = match (chars.next(), chars.next(), chars.next()) {
                (Some(f), Some(r), None) => (f, r),
                _ => return Err(FenError::InvalidEnPassant(en_passant_field.to_string())),
            };
            if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
                return Err(FenError::InvalidEnPassant(en_passant_field.to_string()));
            }
            let ep_rank = 8 - (rank_char as u16 - '0' as u16);
            let ep_file = file_char as u16 - 'a' as u16;
            current_game_state |= ep_rank << 4;
            current_game_state |= ep_file << 7;
        }

        let mut state = GameState {
            board,
            player,
            white_king: white_king.unwrap_or((7, 4)),
            black_king: black_king.unwrap_or((0, 4)),
            current_game_state,
            game_state_history: Vec::with_capacity(HISTORY_CAPACITY),
            zobrist_key: 0,
            zobrist_history: Vec::with_capacity(HISTORY_CAPACITY),
        };
        state.rebuild_zobrist();
        Ok(state)
    }

    /// Recomputes the zobrist key from the board. Used at initialization
    /// and after host-level board surgery; the search itself relies on the
    /// incremental updates in `make_move`/`unmake_move`.
    pub fn rebuild_zobrist(&mut self) {
        self.zobrist_key = ZOBRIST.compute_full(&self.board);
        if self.player == BLACK {
            self.zobrist_key ^= ZOBRIST.black_to_move;
        }
    }

    /// Generates all legal moves for the side to move. Pseudo-legal
    /// candidates come from the per-piece generators; each is vetted by
    /// `is_legal` before it is admitted to the list.
    pub fn generate_moves(&mut self) -> MoveList {
        let mut moves = MoveList::new();
        for rank in 0..8 {
            for file in 0..8 {
                let piece = self.board[rank][file];
                if piece * self.player <= 0 {
                    continue;
                }
                match piece.abs() {
                    KING => self.king_moves(rank, file, &mut moves),
                    QUEEN => self.queen_moves(rank, file, &mut moves),
                    ROOK => self.rook_moves(rank, file, &mut moves),
                    KNIGHT => self.knight_moves(rank, file, &mut moves),
                    BISHOP => self.bishop_moves(rank, file, &mut moves),
                    _ => self.pawn_moves(rank, file, &mut moves),
                }
            }
        }
        moves
    }

    /// Simulates the move and rejects it if the mover's king would be
    /// attacked afterwards. Relies on make/unmake being cheap.
    pub fn is_legal(&mut self, m: Move) -> bool {
        let mover = self.player;
        self.make_move(m);
        let (king_rank, king_file) = if mover == WHITE {
            self.white_king
        } else {
            self.black_king
        };
        let legal = !self.is_attacked(king_rank, king_file, mover);
        self.unmake_move(m);
        legal
    }

    pub(crate) fn push_if_legal(&mut self, m: Move, moves: &mut MoveList) {
        if self.is_legal(m) {
            moves.push(m);
        }
    }

    /// Checks whether the given square is attacked by any enemy of
    /// `defender`. Returns on the first attacker found.
    pub fn is_attacked(&self, rank: usize, file: usize, defender: i8) -> bool {
        const KNIGHT_OFFSETS: [(i32, i32); 8] = [
            (-2, 1), (-1, 2), (-2, -1), (-1, -2), (1, -2), (1, 2), (2, -1), (2, 1),
        ];
        // Orthogonal directions first, then diagonals.
        const RAY_OFFSETS: [(i32, i32); 8] = [
            (0, 1), (0, -1), (1, 0), (-1, 0), (1, 1), (1, -1), (-1, 1), (-1, -1),
        ];

        let rank = rank as i32;
        let file = file as i32;

        for (dr, df) in KNIGHT_OFFSETS {
            let (r, f) = (rank + dr, file + df);
            if in_board(r, f) && self.board[r as usize][f as usize] * defender == -KNIGHT {
                return true;
            }
        }

        for &(dr, df) in &RAY_OFFSETS[..4] {
            let (mut r, mut f) = (rank + dr, file + df);
            while in_board(r, f) {
                let piece = self.board[r as usize][f as usize] * defender;
                if piece == -ROOK || piece == -QUEEN {
                    return true;
                }
                if piece != 0 {
                    break;
                }
                r += dr;
                f += df;
            }
        }

        for &(dr, df) in &RAY_OFFSETS[4..] {
            let (mut r, mut f) = (rank + dr, file + df);
            while in_board(r, f) {
                let piece = self.board[r as usize][f as usize] * defender;
                if piece == -BISHOP || piece == -QUEEN {
                    return true;
                }
                if piece != 0 {
                    break;
                }
                r += dr;
                f += df;
            }
        }

        for (dr, df) in RAY_OFFSETS {
            let (r, f) = (rank + dr, file + df);
            if in_board(r, f) && self.board[r as usize][f as usize] * defender == -KING {
                return true;
            }
        }

        // Pawns attack toward the defender's side of the board.
        let pawn_rank = if defender == WHITE { rank - 1 } else { rank + 1 };
        for df in [-1, 1] {
            let f = file + df;
            if in_board(pawn_rank, f)
                && self.board[pawn_rank as usize][f as usize] * defender == -PAWN
            {
                return true;
            }
        }

        false
    }

    /// Whether the side to move has its king attacked.
    pub fn in_check(&self) -> bool {
        let (king_rank, king_file) = if self.player == WHITE {
            self.white_king
        } else {
            self.black_king
        };
        self.is_attacked(king_rank, king_file, self.player)
    }

    /// Applies the move, updating the board, king positions, castling
    /// rights, en-passant target, captured-piece record and the zobrist
    /// key. The previous game-state word and key go onto history stacks.
    pub fn make_move(&mut self, m: Move) {
        self.game_state_history.push(self.current_game_state);
        self.zobrist_history.push(self.zobrist_key);

        let (from_rank, from_file) = (m.from_rank(), m.from_file());
        let (to_rank, to_file) = (m.to_rank(), m.to_file());
        let piece = self.board[from_rank][from_file];
        let target = self.board[to_rank][to_file];

        // Clear the en-passant bits and record the captured piece.
        self.current_game_state &= !EN_PASSANT_MASK;
        self.current_game_state &= !CAPTURED_MASK;
        self.current_game_state |= (target.unsigned_abs() as u16) << 10;
        if target > 0 {
            self.current_game_state |= 1 << 13;
        }

        self.board[from_rank][from_file] = 0;
        self.board[to_rank][to_file] = piece;

        self.zobrist_key ^= ZOBRIST.piece_key(piece, from_rank, from_file);
        self.zobrist_key ^= ZOBRIST.piece_key(piece, to_rank, to_file);
        if target != 0 {
            self.zobrist_key ^= ZOBRIST.piece_key(target, to_rank, to_file);
        }

        // A king move forfeits both castling rights, a rook leaving its
        // corner forfeits that side.
        if piece == KING {
            self.current_game_state &= !(W_KING_SIDE | W_QUEEN_SIDE);
            self.white_king = (to_rank, to_file);
        } else if piece == -KING {
            self.current_game_state &= !(B_KING_SIDE | B_QUEEN_SIDE);
            self.black_king = (to_rank, to_file);
        } else if piece == ROOK {
            if (from_rank, from_file) == (7, 0) {
                self.current_game_state &= !W_QUEEN_SIDE;
            } else if (from_rank, from_file) == (7, 7) {
                self.current_game_state &= !W_KING_SIDE;
            }
        } else if piece == -ROOK {
            if (from_rank, from_file) == (0, 0) {
                self.current_game_state &= !B_QUEEN_SIDE;
            } else if (from_rank, from_file) == (0, 7) {
                self.current_game_state &= !B_KING_SIDE;
            }
        }

        // A rook captured on its corner also forfeits that side's right.
        if target == ROOK {
            if (to_rank, to_file) == (7, 0) {
                self.current_game_state &= !W_QUEEN_SIDE;
            } else if (to_rank, to_file) == (7, 7) {
                self.current_game_state &= !W_KING_SIDE;
            }
        } else if target == -ROOK {
            if (to_rank, to_file) == (0, 0) {
                self.current_game_state &= !B_QUEEN_SIDE;
            } else if (to_rank, to_file) == (0, 7) {
                self.current_game_state &= !B_KING_SIDE;
            }
        }

        if m.is_promotion() {
            self.board[to_rank][to_file] = QUEEN * self.player;
            self.zobrist_key ^= ZOBRIST.piece_key(PAWN * self.player, to_rank, to_file);
            self.zobrist_key ^= ZOBRIST.piece_key(QUEEN * self.player, to_rank, to_file);
        } else if m.is_castle() {
            let (rook_from, rook_to) = rook_castling_squares(to_rank, to_file);
            let rook = self.board[rook_from.0][rook_from.1];
            self.board[rook_to.0][rook_to.1] = rook;
            self.board[rook_from.0][rook_from.1] = 0;
            self.zobrist_key ^= ZOBRIST.piece_key(rook, rook_from.0, rook_from.1);
            self.zobrist_key ^= ZOBRIST.piece_key(rook, rook_to.0, rook_to.1);
        } else if m.is_pawn_two_moves() {
            // Flag the square behind the pawn as the en-passant target.
            let ep_rank = if self.player == WHITE {
                to_rank + 1
            } else {
                to_rank - 1
            };
            self.current_game_state |= (ep_rank as u16) << 4;
            self.current_game_state |= (to_file as u16) << 7;
        } else if m.is_en_passant() {
            let captured_rank = if self.player == WHITE {
                to_rank + 1
            } else {
                to_rank - 1
            };
            self.board[captured_rank][to_file] = 0;
            self.zobrist_key ^= ZOBRIST.piece_key(-PAWN * self.player, captured_rank, to_file);
        }

        self.player = -self.player;
        self.zobrist_key ^= ZOBRIST.black_to_move;
    }

    /// Reverts `make_move` using the captured-piece record and the history
    /// stacks. Must be called with the move that was made last.
    pub fn unmake_move(&mut self, m: Move) {
        let (from_rank, from_file) = (m.from_rank(), m.from_file());
        let (to_rank, to_file) = (m.to_rank(), m.to_file());
        let piece = self.board[to_rank][to_file];
        let captured = self.captured_piece();

        self.board[from_rank][from_file] = piece;
        self.board[to_rank][to_file] = captured;

        self.player = -self.player;

        if piece == KING {
            self.white_king = (from_rank, from_file);
        } else if piece == -KING {
            self.black_king = (from_rank, from_file);
        }

        if m.is_promotion() {
            self.board[from_rank][from_file] = PAWN * self.player;
        } else if m.is_castle() {
            let (rook_from, rook_to) = rook_castling_squares(to_rank, to_file);
            let rook = self.board[rook_to.0][rook_to.1];
            self.board[rook_from.0][rook_from.1] = rook;
            self.board[rook_to.0][rook_to.1] = 0;
        } else if m.is_en_passant() {
            if self.player == WHITE {
                self.board[to_rank + 1][to_file] = -PAWN;
            } else {
                self.board[to_rank - 1][to_file] = PAWN;
            }
        }

        self.current_game_state = self
            .game_state_history
            .pop()
            .expect("unmake_move without a matching make_move");
        self.zobrist_key = self
            .zobrist_history
            .pop()
            .expect("unmake_move without a matching make_move");
    }

    /// The side to move has no legal moves and is in check.
    pub fn is_checkmate(&mut self) -> bool {
        self.generate_moves().is_empty() && self.in_check()
    }

    /// The side to move has no legal moves but is not in check.
    pub fn is_stalemate(&mut self) -> bool {
        self.generate_moves().is_empty() && !self.in_check()
    }

    /// The en-passant target square, `(0, 0)` when none is available.
    /// The overload is sound because a8 can never be an en-passant target.
    pub fn en_passant(&self) -> (usize, usize) {
        let rank = ((self.current_game_state >> 4) & 7) as usize;
        let file = ((self.current_game_state >> 7) & 7) as usize;
        (rank, file)
    }

    pub fn can_castle(&self, side: u16) -> bool {
        self.current_game_state & side != 0
    }

    /// The piece captured by the last made move, zero if none.
    pub fn captured_piece(&self) -> i8 {
        let magnitude = ((self.current_game_state >> 10) & 7) as i8;
        if (self.current_game_state >> 13) & 1 != 0 {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Looks up the generated move matching the given coordinates, which
    /// carries the flags (castling, en passant, promotion) the plain
    /// coordinates cannot express.
    pub fn find_move(
        &mut self,
        from: (usize, usize),
        to: (usize, usize),
    ) -> Option<Move> {
        self.generate_moves().into_iter().find(|m| {
            m.from_rank() == from.0
                && m.from_file() == from.1
                && m.to_rank() == to.0
                && m.to_file() == to.1
        })
    }

    /// ASCII rendering of the board for logs and debugging.
    pub fn show(&self) -> String {
        let mut output = String::from("   a b c d e f g h\n\n");
        for rank in 0..8 {
            output.push((b'0' + (8 - rank) as u8) as char);
            output.push_str("  ");
            for file in 0..8 {
                output.push(piece_char(self.board[rank][file]));
                output.push(' ');
            }
            output.push('\n');
        }
        output
    }
}

/// Rook source and destination squares for a castling move, keyed by the
/// king's destination.
fn rook_castling_squares(to_rank: usize, to_file: usize) -> ((usize, usize), (usize, usize)) {
    match (to_rank, to_file) {
        (0, 2) => ((0, 0), (0, 3)),
        (0, 6) => ((0, 7), (0, 5)),
        (7, 2) => ((7, 0), (7, 3)),
        _ => ((7, 7), (7, 5)),
    }
}

fn piece_char(piece: i8) -> char {
    let c = match piece.abs() {
        KING => 'k',
        QUEEN => 'q',
        ROOK => 'r',
        KNIGHT => 'n',
        BISHOP => 'b',
        PAWN => 'p',
        _ => return '.',
    };
    if piece > 0 {
        c.to_ascii_uppercase()
    } else {
        c
    }
}
