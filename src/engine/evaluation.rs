// Static position evaluation
//
// Material and piece-square values are kept as separate middlegame and
// endgame sums that are blended by a material-phase weight (tapered
// evaluation), then pawn-structure terms are added on top. The result is
// returned from the side to move's perspective, as the negamax search
// expects.

use super::piece_square_tables::pcsq_value;
use crate::game::{GameState, BLACK, PAWN, WHITE};

// Indexed by piece magnitude; index 0 is unused.
const GAMEPHASE_INC: [i32; 7] = [0, 0, 4, 2, 1, 1, 0];
const MG_VALUE: [i32; 7] = [0, 0, 1025, 477, 337, 365, 82];
const EG_VALUE: [i32; 7] = [0, 0, 936, 512, 281, 297, 94];

// Indexed by the passed pawn's distance from promotion in ranks.
const PASSED_PAWN_BONUSES: [i32; 7] = [0, 120, 80, 50, 30, 15, 15];
// Indexed by how many isolated pawns a side has.
const ISOLATED_PAWN_PENALTY_BY_COUNT: [i32; 9] = [0, -10, -25, -50, -75, -75, -75, -75, -75];

/// Evaluates the position in centipawns, positive meaning good for the
/// side to move.
pub fn evaluate(state: &GameState) -> i32 {
    let mut mg_eval = 0;
    let mut eg_eval = 0;
    let mut game_phase = 0;

    // Per-file pawn ranks for the pawn-structure terms; -1 marks a file
    // without a pawn of that color.
    let mut white_pawn_rank = [-1i32; 8];
    let mut black_pawn_rank = [-1i32; 8];

    for rank in 0..8 {
        for file in 0..8 {
            let piece = state.board[rank][file];
            if piece == 0 {
                continue;
            }

            if piece == PAWN {
                white_pawn_rank[file] = rank as i32;
            } else if piece == -PAWN {
                black_pawn_rank[file] = rank as i32;
            }

            let magnitude = piece.unsigned_abs() as usize;
            let (mut mg_piece, mut eg_piece) = (MG_VALUE[magnitude], EG_VALUE[magnitude]);
            if piece < 0 {
                mg_piece = -mg_piece;
                eg_piece = -eg_piece;
            }

            mg_eval += pcsq_value(rank, file, piece, false) + mg_piece;
            eg_eval += pcsq_value(rank, file, piece, true) + eg_piece;
            game_phase += GAMEPHASE_INC[magnitude];
        }
    }

    let pawn_structure = evaluate_pawns(WHITE, &white_pawn_rank, &black_pawn_rank)
        + evaluate_pawns(BLACK, &white_pawn_rank, &black_pawn_rank);

    // Early promotions can push the phase past the opening total.
    let mg_phase = game_phase.min(24);
    let eg_phase = 24 - mg_phase;

    let eval = (mg_eval * mg_phase + eg_eval * eg_phase) / 24 + pawn_structure;
    if state.player == WHITE {
        eval
    } else {
        -eval
    }
}

/// Pawn-structure terms for one side, signed so that White's bonuses are
/// positive and Black's negative.
fn evaluate_pawns(team: i8, white_pawn_rank: &[i32; 8], black_pawn_rank: &[i32; 8]) -> i32 {
    let mut isolated = 0usize;
    let mut bonus = 0;

    for file in 0..8 {
        let white_rank = white_pawn_rank[file];
        let black_rank = black_pawn_rank[file];

        if team == WHITE && white_rank != -1 {
            if (file == 0 || white_pawn_rank[file - 1] == -1)
                && (file == 7 || white_pawn_rank[file + 1] == -1)
            {
                isolated += 1;
            }

            // Passed iff no black pawn sits ahead of it on its own or an
            // adjacent file. Smaller rank indices are further up the
            // board, toward White's promotion rank.
            let mut passed = true;
            if file > 0
                && black_pawn_rank[file - 1] < white_rank
                && black_pawn_rank[file - 1] != -1
            {
                passed = false;
            }
            if file < 7
                && black_pawn_rank[file + 1] < white_rank
                && black_pawn_rank[file + 1] != -1
            {
                passed = false;
            }
            if black_pawn_rank[file] < white_rank && black_pawn_rank[file] != -1 {
                passed = false;
            }
            if passed {
                bonus += PASSED_PAWN_BONUSES[white_rank as usize];
            }
        } else if team == BLACK && black_rank != -1 {
            if (file == 0 || black_pawn_rank[file - 1] == -1)
                && (file == 7 || black_pawn_rank[file + 1] == -1)
            {
                isolated += 1;
            }

            let mut passed = true;
            if file > 0 && white_pawn_rank[file - 1] > black_rank {
                passed = false;
            }
            if file < 7 && white_pawn_rank[file + 1] > black_rank {
                passed = false;
            }
            if white_pawn_rank[file] > black_rank {
                passed = false;
            }
            if passed {
                bonus -= PASSED_PAWN_BONUSES[(7 - black_rank) as usize];
            }
        }
    }

    let penalty = ISOLATED_PAWN_PENALTY_BY_COUNT[isolated];
    let penalty = if team == WHITE { penalty } else { -penalty };

    penalty + bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_is_balanced() {
        let state = GameState::new();
        assert_eq!(evaluate(&state), 0, "symmetric position must score zero");
    }

    #[test]
    fn test_perspective_flips_with_side_to_move() {
        let white = GameState::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -")
            .unwrap();
        let black = GameState::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -")
            .unwrap();
        assert_eq!(evaluate(&white), -evaluate(&black));
    }

    #[test]
    fn test_material_advantage_dominates() {
        // White has an extra knight.
        let state =
            GameState::from_fen("r1bqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap();
        let score = evaluate(&state);
        assert!(score > 250, "extra knight should score high, got {score}");
    }

    #[test]
    fn test_passed_pawn_bonus_grows_with_advancement() {
        let far = GameState::from_fen("4k3/8/8/8/8/8/P7/4K3 w - -").unwrap();
        let near = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - -").unwrap();
        assert!(
            evaluate(&near) > evaluate(&far),
            "a pawn one step from promotion should outscore one at home"
        );
    }

    #[test]
    fn test_isolated_pawns_are_penalized() {
        // Same material, but the isolated side's pawns have no neighbors.
        let isolated = [-1, 2, -1, 2, -1, 2, -1, -1];
        let connected = [-1, 2, 2, 2, -1, -1, -1, -1];
        let none = [-1i32; 8];
        let isolated_score = evaluate_pawns(WHITE, &isolated, &none);
        let connected_score = evaluate_pawns(WHITE, &connected, &none);
        assert!(isolated_score < connected_score);
    }

    #[test]
    fn test_blocked_pawn_is_not_passed() {
        let white = [-1, -1, -1, -1, 4, -1, -1, -1];
        let blocking_black = [-1, -1, -1, 3, -1, -1, -1, -1];
        let none = [-1i32; 8];

        let open = evaluate_pawns(WHITE, &white, &none);
        let blocked = evaluate_pawns(WHITE, &white, &blocking_black);
        assert!(open > blocked, "an adjacent enemy pawn ahead blocks the bonus");
        assert_eq!(open - blocked, PASSED_PAWN_BONUSES[4]);
    }

    #[test]
    fn test_tapered_phase_shifts_king_preference() {
        // In a bare-kings endgame the centralized king must beat the
        // cornered one.
        let centered = GameState::from_fen("7k/8/8/4K3/8/8/8/8 w - -").unwrap();
        let cornered = GameState::from_fen("7k/8/8/8/8/8/8/K7 w - -").unwrap();
        assert!(evaluate(&centered) > evaluate(&cornered));
    }
}
