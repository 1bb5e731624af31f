// Host interface
//
// The engine owns the game state, the transposition table and the
// searcher, and exposes the four operations a front end needs: start a
// new game, install a position plus a move list, configure the search
// deadline and search. Anything speaking UCI lives outside; only the
// 4-5 character move encoding is understood here.

use std::time::Duration;

use log::info;
use thiserror::Error;

use super::search::Searcher;
use super::transposition_table::TranspositionTable;
use crate::game::{FenError, GameState, Move, BISHOP, KNIGHT, QUEEN, ROOK, WHITE};

/// Default transposition table size in MiB.
pub const DEFAULT_TABLE_SIZE_MB: usize = 400;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The host asked for a move that is not legal in the current
    /// position.
    #[error("move '{0}' is not legal in the current position")]
    MoveNotFound(String),
    /// The current position is checkmate or stalemate.
    #[error("no legal moves in the current position")]
    NoLegalMoves,
    #[error(transparent)]
    InvalidFen(#[from] FenError),
}

pub struct Engine {
    state: GameState,
    table: TranspositionTable,
    searcher: Searcher,
}

impl Engine {
    pub fn new(table_size_mb: usize) -> Engine {
        Engine {
            state: GameState::new(),
            table: TranspositionTable::new(table_size_mb),
            searcher: Searcher::new(),
        }
    }

    /// Clears the transposition table and resets the board to the
    /// standard position.
    pub fn new_game(&mut self) {
        self.table.clear();
        self.state = GameState::new();
        info!("new game: board reset, transposition table cleared");
    }

    /// Installs `"startpos"` or a FEN, then applies a sequence of moves in
    /// coordinate notation. A failed FEN leaves the previous position in
    /// place; a failed move leaves the moves up to it applied.
    pub fn set_position(&mut self, position: &str, moves: &[&str]) -> Result<(), EngineError> {
        self.state = if position == "startpos" {
            GameState::new()
        } else {
            GameState::from_fen(position)?
        };
        for text in moves {
            self.apply_move_text(text)?;
        }
        Ok(())
    }

    fn apply_move_text(&mut self, text: &str) -> Result<(), EngineError> {
        let (from, to, promotion) =
            parse_move_text(text).ok_or_else(|| EngineError::MoveNotFound(text.to_string()))?;
        let m = self
            .state
            .find_move(from, to)
            .ok_or_else(|| EngineError::MoveNotFound(text.to_string()))?;
        self.state.make_move(m);

        // Only queen promotions are generated; an explicit suffix installs
        // the requested piece over the default queen, after which the
        // incremental hash no longer matches and must be rebuilt.
        if let Some(magnitude) = promotion {
            if m.is_promotion() && magnitude != QUEEN {
                let mover = -self.state.player;
                self.state.board[to.0][to.1] = magnitude * mover;
                self.state.rebuild_zobrist();
            }
        }
        Ok(())
    }

    /// Deadline for subsequent `search` calls, in milliseconds.
    pub fn set_search_time(&mut self, ms: u64) {
        self.searcher.set_time_limit(Duration::from_millis(ms));
    }

    /// Searches the current position and returns the best move found.
    pub fn search(&mut self) -> Result<Move, EngineError> {
        let best = self
            .searcher
            .find_best_move(&mut self.state, &mut self.table)
            .ok_or(EngineError::NoLegalMoves)?;
        log::debug!("{}", self.searcher.summary());
        log::debug!("{}", self.table.fill_summary());
        Ok(best)
    }

    /// Applies a move the host has decided to play.
    pub fn play(&mut self, m: Move) {
        self.state.make_move(m);
    }

    /// Think time for a clock-based `go`: a fraction of the remaining
    /// time, most of the increment, and a small floor so the engine never
    /// moves instantly on a low clock.
    pub fn choose_think_time(&self, wtime: u64, btime: u64, winc: u64, binc: u64) -> u64 {
        let (remaining, increment) = if self.state.player == WHITE {
            (wtime, winc)
        } else {
            (btime, binc)
        };

        let mut think = remaining / 40;
        if remaining > increment * 2 {
            think += increment * 7 / 10;
        }
        think.max(50.min(remaining / 4))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }
}

/// Parses a 4-5 character coordinate move like `e2e4` or `a7a8q` into
/// board coordinates and an optional promotion piece.
fn parse_move_text(text: &str) -> Option<((usize, usize), (usize, usize), Option<i8>)> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 4 || chars.len() > 5 {
        return None;
    }
    let from = to_index(chars[0], chars[1])?;
    let to = to_index(chars[2], chars[3])?;
    let promotion = match chars.get(4) {
        None => None,
        Some('q') => Some(QUEEN),
        Some('r') => Some(ROOK),
        Some('b') => Some(BISHOP),
        Some('n') => Some(KNIGHT),
        Some(_) => return None,
    };
    Some((from, to, promotion))
}

/// Converts a file letter and rank digit to board indices; rank 1 is
/// White's back rank, which is row 7 internally.
fn to_index(file: char, rank: char) -> Option<(usize, usize)> {
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    let rank_index = 8 - (rank as usize - '0' as usize);
    let file_index = file as usize - 'a' as usize;
    Some((rank_index, file_index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PAWN;

    fn engine() -> Engine {
        // Small table keeps the tests light.
        Engine::new(16)
    }

    #[test]
    fn test_set_position_startpos_with_moves() {
        let mut engine = engine();
        engine
            .set_position("startpos", &["e2e4", "e7e5", "g1f3"])
            .unwrap();

        let state = engine.state();
        assert_eq!(state.board[4][4], PAWN); // e4
        assert_eq!(state.board[3][4], -PAWN); // e5
        assert_eq!(state.board[5][5], KNIGHT); // knight on f3
        assert_eq!(state.player, -1, "black to move after three half-moves");
    }

    #[test]
    fn test_unknown_move_is_rejected() {
        let mut engine = engine();
        let err = engine.set_position("startpos", &["e2e5"]).unwrap_err();
        assert!(matches!(err, EngineError::MoveNotFound(_)));
    }

    #[test]
    fn test_invalid_fen_is_rejected() {
        let mut engine = engine();
        let err = engine.set_position("not a fen", &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidFen(_)));
    }

    #[test]
    fn test_underpromotion_suffix_installs_piece() {
        let mut engine = engine();
        engine
            .set_position("8/P7/8/8/8/8/8/k6K w - - 0 1", &["a7a8r"])
            .unwrap();

        let state = engine.state();
        assert_eq!(state.board[0][0], ROOK, "rook installed over the default queen");

        // The rebuilt key must equal a from-scratch recomputation.
        let mut fresh = state.clone();
        fresh.rebuild_zobrist();
        assert_eq!(state.zobrist_key, fresh.zobrist_key);
    }

    #[test]
    fn test_search_mate_in_one_through_interface() {
        let mut engine = engine();
        engine
            .set_position("4k3/8/4K3/8/8/8/8/R7 w - - 0 1", &[])
            .unwrap();
        engine.set_search_time(1000);

        let best = engine.search().unwrap();
        assert_eq!(best.uci(), "a1a8");
    }

    #[test]
    fn test_search_on_terminal_position_errors() {
        let mut engine = engine();
        engine
            .set_position("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1", &[])
            .unwrap();
        engine.set_search_time(100);

        assert!(matches!(engine.search(), Err(EngineError::NoLegalMoves)));
    }

    #[test]
    fn test_move_text_parsing() {
        assert_eq!(
            parse_move_text("e2e4"),
            Some(((6, 4), (4, 4), None))
        );
        assert_eq!(
            parse_move_text("a7a8n"),
            Some(((1, 0), (0, 0), Some(KNIGHT)))
        );
        assert_eq!(parse_move_text("e2"), None);
        assert_eq!(parse_move_text("i9i9"), None);
        assert_eq!(parse_move_text("a7a8x"), None);
    }

    #[test]
    fn test_think_time_heuristic() {
        let engine = engine();
        // 2 minutes on the clock, 1 second increment.
        let think = engine.choose_think_time(120_000, 120_000, 1000, 1000);
        assert_eq!(think, 120_000 / 40 + 700);

        // Nearly flagged: the floor shrinks with the clock.
        let panic_time = engine.choose_think_time(120, 120, 0, 0);
        assert_eq!(panic_time, 30);
    }
}
