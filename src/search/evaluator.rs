//! Parallel move evaluator
//!
//! Every rule-legal move of the evaluated side becomes one task on a
//! `WorkerPool`. A task clones the board when it is submitted, scores the move
//! on that private copy (recursing into the opponent's replies when depth
//! allows) and inserts the result into a shared `BoundedTopK`. The ranking
//! mutex is held only for that insert; scoring touches nothing shared.

use crate::board::{Board, Color, Move, PieceKind, Square};
use crate::error::Result;
use crate::pieces;
use crate::search::{BoundedTopK, EvalParams, SearchStats, WorkerPool};
use crate::utils::{all_squares, is_center};
use std::sync::{Arc, Mutex};

/// Bonus for landing in the central 4x4 region
pub const CENTER_BONUS: i32 = 3;

/// Bonus for delivering mate, penalty for leaving the own King attacked
pub const MATE_SCORE: i32 = 10_000;

pub struct MoveEvaluator<'a> {
    board: &'a Board,
    side: Color,
    params: EvalParams,
    best: Arc<Mutex<BoundedTopK<Move>>>,
    stats: SearchStats,
}

impl<'a> MoveEvaluator<'a> {
    pub fn new(board: &'a Board, side: Color) -> Self {
        let params = EvalParams::default();
        let best = Arc::new(Mutex::new(BoundedTopK::new(params.top_k)));
        Self {
            board,
            side,
            params,
            best,
            stats: SearchStats::new(),
        }
    }

    pub fn with_params(mut self, params: EvalParams) -> Self {
        self.best = Arc::new(Mutex::new(BoundedTopK::new(params.top_k)));
        self.params = params;
        self
    }

    pub fn side(&self) -> Color {
        self.side
    }

    pub fn params(&self) -> &EvalParams {
        &self.params
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Evaluate with the configured depth and worker count
    pub fn run(&mut self) -> Result<&SearchStats> {
        let (depth, workers) = (self.params.depth, self.params.workers);
        self.evaluate(depth, workers)
    }

    /// Score every candidate move. Blocks until all tasks are done; a task that
    /// panics is logged and contributes no candidate.
    pub fn evaluate(&mut self, depth: u32, workers: usize) -> Result<&SearchStats> {
        self.stats.reset();
        self.stats.start_timing();
        self.best
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();

        let candidates = self.board.rule_moves(self.side);
        log::debug!(
            "evaluating {} candidate moves for {:?} at depth {} on {} workers",
            candidates.len(),
            self.side,
            depth,
            workers
        );

        let pool = WorkerPool::new(workers)?;
        let mut handles = Vec::with_capacity(candidates.len());
        for (from, to) in candidates {
            self.stats.inc_root_node();
            let snapshot = self.board.clone();
            let best = Arc::clone(&self.best);
            let side = self.side;
            handles.push(pool.submit(move || {
                let mut board = snapshot;
                let mut nodes = 0u64;
                let score = score_move(&mut board, side, from, to, depth, &mut nodes);
                best.lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .insert(Move::new(from, to, score));
                nodes
            }));
        }

        for handle in handles {
            match handle.wait() {
                Ok(nodes) => self.stats.add_nodes(nodes),
                Err(e) => {
                    log::warn!("evaluation task failed: {}", e);
                    self.stats.inc_failed_task();
                }
            }
        }
        drop(pool);

        self.stats.update_timing();
        log::info!("evaluation for {:?} done: {}", self.side, self.stats.summary());
        Ok(&self.stats)
    }

    /// Ranked candidates, best first. Reads a copy, so it can be called again.
    pub fn best_moves(&self) -> Vec<Move> {
        let mut ranking = self
            .best
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        let mut out = Vec::with_capacity(ranking.len());
        while let Ok(mv) = ranking.pop_best() {
            out.push(mv);
        }
        out
    }
}

/// Heuristic score of `side` playing `from`->`to`, searching `depth` plies of
/// replies. The board is restored before returning. `nodes` counts every move
/// scored, this one included.
pub fn score_move(
    board: &mut Board,
    side: Color,
    from: Square,
    to: Square,
    depth: u32,
    nodes: &mut u64,
) -> i32 {
    let Some(moved) = board.piece_at(from) else {
        return 0;
    };
    *nodes += 1;

    let mut score = 0;
    if let Some(target) = board.piece_at(to) {
        score += target.kind.value();
    }
    if is_center(to) {
        score += CENTER_BONUS;
    }

    let undo = board.make_move(from, to, Some(PieceKind::Queen));

    score += threat_adjustment(board, side, from, to, moved.kind);
    score += board_control(board, side);

    let opponent = side.opponent();
    if board.is_king_in_check(opponent) && !board.can_escape_check(opponent) {
        score += MATE_SCORE;
    }
    if board.is_king_in_check(side) {
        score -= MATE_SCORE;
    }

    if depth > 0 {
        let replies = board.rule_moves(opponent);
        let best_reply = replies
            .into_iter()
            .map(|(reply_from, reply_to)| {
                score_move(board, opponent, reply_from, reply_to, depth - 1, nodes)
            })
            .max();
        if let Some(best_reply) = best_reply {
            score -= best_reply;
        }
    }

    board.unmake_move(undo);
    score
}

// Penalise a piece that a cheaper enemy can now take; reward an enemy heavier
// than the moved piece that can reach the square it left
fn threat_adjustment(board: &Board, side: Color, from: Square, to: Square, moved: PieceKind) -> i32 {
    let moved_value = moved.value();
    let mut score = 0;
    for (sq, enemy) in board.pieces_of(side.opponent()) {
        let enemy_value = enemy.kind.value();
        if enemy_value < moved_value && pieces::is_legal(enemy, sq, to, board) {
            score -= moved_value;
        }
        if enemy_value > moved_value && pieces::is_legal(enemy, sq, from, board) {
            score += enemy_value;
        }
    }
    score
}

/// Squares reachable by `side` minus squares reachable by the opponent,
/// counted per (piece, destination) pair
pub fn board_control(board: &Board, side: Color) -> i32 {
    reach(board, side) - reach(board, side.opponent())
}

fn reach(board: &Board, color: Color) -> i32 {
    board
        .pieces_of(color)
        .map(|(from, piece)| {
            all_squares()
                .filter(|&to| pieces::is_legal(piece, from, to, board))
                .count() as i32
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_is_symmetric_at_start() {
        let board = Board::new();
        assert_eq!(board_control(&board, Color::White), 0);
        assert_eq!(board_control(&board, Color::Black), 0);
        // 16 pawn moves + 4 knight moves each
        assert_eq!(reach(&board, Color::White), 20);
    }

    #[test]
    fn score_move_restores_the_board() {
        let mut board = Board::new();
        let before = board.clone();
        let mut nodes = 0;
        let score = score_move(
            &mut board,
            Color::White,
            Square::new(1, 4),
            Square::new(3, 4),
            1,
            &mut nodes,
        );
        assert_eq!(board, before);
        // root move plus the 20 black replies
        assert_eq!(nodes, 21);
        assert!(score.abs() < MATE_SCORE);
    }

    #[test]
    fn capture_and_center_terms() {
        // white knight takes an undefended black queen in the centre
        let board: Board = "####K#######################N#########q########################k"
            .parse()
            .unwrap();
        let mut copy = board.clone();
        let mut nodes = 0;
        let from = Square::new(3, 4);
        let to = Square::new(4, 6);
        assert_eq!(board.piece_at(to).map(|p| p.kind), Some(PieceKind::Queen));
        let score = score_move(&mut copy, Color::White, from, to, 0, &mut nodes);

        let mut after = board.clone();
        after.make_move(from, to, None);
        let expected = PieceKind::Queen.value() + board_control(&after, Color::White);
        // (4, 6) is outside the centre, nobody threatens anything
        assert_eq!(score, expected);
    }

    #[test]
    fn empty_side_yields_no_moves() {
        let board: Board = "####K###########################################################"
            .parse()
            .unwrap();
        let mut evaluator = MoveEvaluator::new(&board, Color::Black);
        let stats = evaluator.evaluate(0, 1).unwrap();
        assert_eq!(stats.root_nodes, 0);
        assert!(evaluator.best_moves().is_empty());
    }
}
