// Zobrist hashing key material
//
// Every (color, piece, square) combination gets a random 64-bit key, plus
// one key for the side to move. A position hash is the XOR of the keys of
// all pieces on the board; make/unmake keep it up to date incrementally so
// the search never recomputes it from scratch.
//
// Castling rights and the en-passant square are not part of the hash;
// positions differing only in those fields share a key.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct ZobristKeys {
    /// Indexed `[color][piece magnitude][rank][file]`. Magnitude index 0 is
    /// unused so the board's sign-magnitude piece encoding indexes directly.
    pub piece_keys: [[[[u64; 8]; 8]; 7]; 2],
    /// XORed into the key whenever Black is to move.
    pub black_to_move: u64,
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::from_entropy();

        let mut piece_keys = [[[[0u64; 8]; 8]; 7]; 2];
        for color in &mut piece_keys {
            for piece in color {
                for rank in piece {
                    for square in rank {
                        *square = rng.gen();
                    }
                }
            }
        }

        Self {
            piece_keys,
            black_to_move: rng.gen(),
        }
    }

    /// Key for one piece on one square, using the board's signed encoding.
    #[inline]
    pub fn piece_key(&self, piece: i8, rank: usize, file: usize) -> u64 {
        let color = if piece > 0 { 0 } else { 1 };
        self.piece_keys[color][piece.unsigned_abs() as usize][rank][file]
    }

    /// XOR-accumulates the keys of every piece on the board. The caller
    /// mixes in `black_to_move` when Black has the move.
    pub fn compute_full(&self, board: &[[i8; 8]; 8]) -> u64 {
        let mut key = 0;
        for rank in 0..8 {
            for file in 0..8 {
                let piece = board[rank][file];
                if piece != 0 {
                    key ^= self.piece_key(piece, rank, file);
                }
            }
        }
        key
    }
}

/// Process-lifetime key material, generated once from system entropy.
pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);
