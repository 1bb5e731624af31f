// Iteratively-deepened negamax search with alpha-beta pruning
//
// The searcher deepens one ply at a time under a wall-clock deadline. An
// iteration that runs out of time is discarded wholesale; the previous
// completed iteration's best move is always available, so a timeout at an
// arbitrary point never corrupts the result. The deadline is only tested
// after a child search returns, never mid-make, and never before at least
// one full iteration has completed.
//
// Mate scores live near i32::MIN + 2 and shrink in magnitude by one per
// ply on the way back to the root, so a shorter mate always outscores a
// longer one.

use std::time::{Duration, Instant};

use log::debug;

use super::evaluation::evaluate;
use super::move_ordering::sort_moves;
use super::transposition_table::{Transposition, TranspositionTable};
use crate::game::{GameState, Move};

/// Score of the side to move being checkmated.
pub const MATE_SCORE: i32 = i32::MIN + 2;
/// Anything beyond this magnitude is a mate score.
pub const MATE_THRESHOLD: i32 = 1_000_000_000;

const MAX_DEPTH: i32 = 255;
const QUIESCENCE_MAX_DEPTH: i32 = 32;
const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(3000);

pub struct Searcher {
    time_limit: Duration,
    /// Depth that must complete before the deadline may interrupt,
    /// guaranteeing a valid move even under an immediate timeout.
    minimum_depth: i32,
    start_time: Instant,
    broke_early: bool,
    best_move: Move,
    best_move_this_iteration: Move,
    best_score: i32,
    best_score_this_iteration: i32,
    pub nodes: u64,
    pub quiescence_nodes: u64,
    pub table_uses: u64,
    pub reached_depth: i32,
    pub elapsed: Duration,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Searcher {
        Searcher {
            time_limit: DEFAULT_TIME_LIMIT,
            minimum_depth: 1,
            start_time: Instant::now(),
            broke_early: false,
            best_move: Move::default(),
            best_move_this_iteration: Move::default(),
            best_score: 0,
            best_score_this_iteration: 0,
            nodes: 0,
            quiescence_nodes: 0,
            table_uses: 0,
            reached_depth: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn set_time_limit(&mut self, limit: Duration) {
        self.time_limit = limit;
    }

    /// The score of the move returned by the last `find_best_move` call.
    pub fn best_score(&self) -> i32 {
        self.best_score
    }

    /// Iterative deepening: searches depth 1, 2, ... until the deadline
    /// trips or a forced mate is found, and returns the best move of the
    /// last fully completed iteration.
    ///
    /// Returns `None` iff the position has no legal moves.
    pub fn find_best_move(
        &mut self,
        state: &mut GameState,
        table: &mut TranspositionTable,
    ) -> Option<Move> {
        self.nodes = 0;
        self.quiescence_nodes = 0;
        self.table_uses = 0;
        self.best_score = i32::MIN + 1;
        self.best_score_this_iteration = 0;
        self.broke_early = false;
        self.start_time = Instant::now();

        // Seed the result with the first legal move so that even an
        // immediate timeout returns something playable.
        let root_moves = state.generate_moves();
        let first = *root_moves.first()?;
        self.best_move = first;
        self.best_move_this_iteration = first;

        let mut depth = 1;
        while depth <= MAX_DEPTH {
            self.negamax(state, table, depth, depth, i32::MIN + 1, i32::MAX);

            if self.time_limit_exceeded(depth) {
                self.broke_early = true;
            }

            // A forced mate cannot improve with more depth.
            if self.best_score_this_iteration.abs() > MATE_THRESHOLD {
                self.broke_early = true;
                self.best_move = self.best_move_this_iteration;
                self.best_score = self.best_score_this_iteration;
            }

            if self.broke_early {
                break;
            }

            self.best_move = self.best_move_this_iteration;
            self.best_score = self.best_score_this_iteration;

            debug!(
                "depth {} best {} score {} nodes {} qnodes {} table {}",
                depth,
                self.best_move.uci(),
                self.best_score,
                self.nodes,
                self.quiescence_nodes,
                self.table_uses,
            );
            depth += 1;
        }

        self.elapsed = self.start_time.elapsed();
        self.reached_depth = depth - self.broke_early as i32;
        Some(self.best_move)
    }

    /// Negamax with fail-hard alpha-beta bounds, from the side to move's
    /// perspective.
    ///
    /// # Arguments
    ///
    /// * `ply_remaining` - plies left before the quiescence handoff
    /// * `root_depth` - depth of the current deepening iteration; the
    ///   difference of the two is the distance from the root
    /// * `alpha`, `beta` - fail-hard search window
    fn negamax(
        &mut self,
        state: &mut GameState,
        table: &mut TranspositionTable,
        ply_remaining: i32,
        root_depth: i32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        let ply_from_root = root_depth - ply_remaining;
        self.nodes += 1;

        if ply_remaining == 0 {
            return self.quiescence(state, table, QUIESCENCE_MAX_DEPTH, alpha, beta);
        }

        if let Some(value) =
            table.lookup(state.zobrist_key, ply_remaining as u8, alpha, beta, false)
        {
            if ply_from_root == 0 {
                // Adopt the stored move at the root, unless it is a
                // mate-valued quiescence entry, which has no meaningful
                // best move attached.
                if let Some(entry) = table.probe(state.zobrist_key) {
                    if !(entry.value.abs() > MATE_THRESHOLD && entry.is_quiescence()) {
                        self.best_move_this_iteration = entry.best_move;
                        self.best_score_this_iteration = entry.value;
                    }
                }
            }
            self.table_uses += 1;
            return value;
        }

        let mut moves = state.generate_moves();
        sort_moves(&mut moves, &state.board);

        if moves.is_empty() {
            return if state.in_check() { MATE_SCORE } else { 0 };
        }

        let mut bound = Transposition::ALPHA;
        let mut best_move_in_pos = moves[0];

        for &m in moves.iter() {
            state.make_move(m);
            let score = -self.negamax(state, table, ply_remaining - 1, root_depth, -beta, -alpha);
            state.unmake_move(m);

            // The result of an interrupted subtree is garbage; the caller
            // discards it too, all the way up to the root.
            if self.time_limit_exceeded(root_depth) {
                self.broke_early = true;
                return 0;
            }

            if score >= beta {
                table.store(
                    state.zobrist_key,
                    Transposition::BETA,
                    ply_remaining as u8,
                    beta,
                    m,
                );
                return beta;
            }

            if score > alpha {
                alpha = score;
                bound = Transposition::EXACT;
                best_move_in_pos = m;

                if ply_from_root == 0 {
                    self.best_move_this_iteration = m;
                    self.best_score_this_iteration = score;
                }
            }
        }

        // Shrink mate scores by one per ply so the root sees the distance.
        if alpha.abs() > MATE_THRESHOLD {
            alpha -= alpha.signum();
        }
        table.store(
            state.zobrist_key,
            bound,
            ply_remaining as u8,
            alpha,
            best_move_in_pos,
        );
        alpha
    }

    /// Captures-only extension of the main search, run at its leaves to
    /// avoid evaluating positions in the middle of an exchange.
    fn quiescence(
        &mut self,
        state: &mut GameState,
        table: &mut TranspositionTable,
        ply_remaining: i32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;
        self.quiescence_nodes += 1;

        let stand_pat = evaluate(state);
        if ply_remaining == 0 {
            return stand_pat;
        }
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        if let Some(value) =
            table.lookup(state.zobrist_key, ply_remaining as u8, alpha, beta, true)
        {
            self.table_uses += 1;
            return value;
        }

        let mut moves = state.generate_moves();
        sort_moves(&mut moves, &state.board);

        if moves.is_empty() {
            return if state.in_check() { MATE_SCORE } else { 0 };
        }

        let mut bound = Transposition::Q_ALPHA;
        let mut best_move_in_pos = moves[0];

        for &m in moves.iter() {
            if !m.is_capture() {
                continue;
            }

            state.make_move(m);
            let score = -self.quiescence(state, table, ply_remaining - 1, -beta, -alpha);
            state.unmake_move(m);

            if score >= beta {
                table.store(
                    state.zobrist_key,
                    Transposition::Q_BETA,
                    ply_remaining as u8,
                    beta,
                    m,
                );
                return beta;
            }
            if score > alpha {
                alpha = score;
                bound = Transposition::Q_EXACT;
                best_move_in_pos = m;
            }
        }

        if alpha.abs() > MATE_THRESHOLD {
            alpha -= alpha.signum();
        }
        table.store(
            state.zobrist_key,
            bound,
            ply_remaining as u8,
            alpha,
            best_move_in_pos,
        );
        alpha
    }

    /// Deadline test, allowed to trip only once the minimum depth has
    /// completed so a search always produces a move.
    fn time_limit_exceeded(&mut self, root_depth: i32) -> bool {
        self.elapsed = self.start_time.elapsed();
        self.elapsed > self.time_limit && root_depth > self.minimum_depth
    }

    /// Human-readable result line for the log.
    pub fn summary(&self) -> String {
        let score = if self.best_score.abs() > MATE_THRESHOLD {
            let mate_in = (i32::MAX - self.best_score.abs() + 1) / 2;
            if self.best_score > 0 {
                format!("mate in {mate_in}")
            } else {
                format!("mated in {mate_in}")
            }
        } else {
            format!("{} cp", self.best_score)
        };
        format!(
            "best move {}: {}, depth {}, {} nodes ({} quiescent), {} table uses, {:.3}s",
            self.best_move.uci(),
            score,
            self.reached_depth,
            self.nodes,
            self.quiescence_nodes,
            self.table_uses,
            self.elapsed.as_secs_f64(),
        )
    }
}
