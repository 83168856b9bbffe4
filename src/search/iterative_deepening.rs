//! Iterative deepening minimax with alpha-beta pruning.
//!
//! Light maximizes and Dark minimizes over `BoardScorer` scores. Depth 1 is
//! always searched to completion so a legal move is returned even under a
//! tiny time budget; deeper iterations stop at the first time check past the
//! deadline (or after a stop request) and fall back to the last completed
//! depth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::generate_all_moves;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{terminal_score_for_loser, BoardScorer, PieceSquareScorer};
use crate::search::move_ordering::order_moves;
use crate::search::search_progress::SearchProgress;

/// Deepest iteration the engine will attempt.
pub const MAX_SEARCH_DEPTH: u8 = 64;

const INFINITY_SCORE: i32 = 1_000_000;

/// Node count between progress publications.
const PROGRESS_NODE_BATCH: u64 = 1024;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// `None` searches every depth to completion.
    pub time_limit: Option<Duration>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            time_limit: None,
            stop_flag: None,
        }
    }
}

impl SearchConfig {
    /// Depth plus a wall-clock budget in seconds. Negative or NaN budgets
    /// count as zero; a budget too large for a `Duration` means no limit.
    pub fn new(max_depth: u8, time_limit_seconds: f64) -> Self {
        let time_limit = Duration::try_from_secs_f64(time_limit_seconds.max(0.0)).ok();
        Self {
            max_depth,
            time_limit,
            stop_flag: None,
        }
    }

    pub fn unbounded(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn with_stop_flag(mut self, stop_flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(stop_flag);
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Light-minus-Dark score of the chosen line.
    pub best_score: i32,
    /// Deepest fully searched iteration.
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    /// True when the time budget or a stop request cut the search short.
    pub aborted: bool,
}

/// Suspension point called once per explored child.
pub trait SearchYield: Send + Sync {
    fn yield_now(&self);
}

/// Never suspends; for synchronous callers and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoYield;

impl SearchYield for NoYield {
    #[inline]
    fn yield_now(&self) {}
}

/// Hands the rest of the time slice back to the OS scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadYield;

impl SearchYield for ThreadYield {
    #[inline]
    fn yield_now(&self) {
        thread::yield_now();
    }
}

/// Scorer, yield hook and progress sink for repeated searches.
#[derive(Debug)]
pub struct SearchEngine<S: BoardScorer = PieceSquareScorer, Y: SearchYield = NoYield> {
    scorer: S,
    yielder: Y,
    progress: Arc<SearchProgress>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::with_parts(PieceSquareScorer::standard(), NoYield)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BoardScorer, Y: SearchYield> SearchEngine<S, Y> {
    pub fn with_parts(scorer: S, yielder: Y) -> Self {
        Self {
            scorer,
            yielder,
            progress: Arc::new(SearchProgress::new()),
        }
    }

    /// Publish progress into a shared sink instead of a private one.
    pub fn with_progress(mut self, progress: Arc<SearchProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn progress(&self) -> Arc<SearchProgress> {
        Arc::clone(&self.progress)
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Best move within `max_depth` plies and `time_limit_seconds`, or `None`
    /// when the budget is zero or the side to move has no moves.
    pub fn find_best_move(
        &self,
        game_state: &GameState,
        max_depth: u8,
        time_limit_seconds: f64,
    ) -> Option<Move> {
        self.search(game_state, &SearchConfig::new(max_depth, time_limit_seconds))
            .best_move
    }

    pub fn search(&self, game_state: &GameState, config: &SearchConfig) -> SearchResult {
        let started_at = Instant::now();
        let max_depth = config.max_depth.min(MAX_SEARCH_DEPTH);
        self.progress.reset();

        if max_depth == 0 || config.time_limit == Some(Duration::ZERO) {
            let score = self.scorer.score(game_state);
            self.progress.set_eval(score);
            return SearchResult {
                best_score: score,
                nodes: 1,
                ..SearchResult::default()
            };
        }

        let mut root = game_state.clone();
        let mut root_moves = if root.is_game_over() {
            Vec::new()
        } else {
            generate_all_moves(&root)
        };
        if root_moves.is_empty() {
            let score = if root.is_game_over() {
                self.scorer.score(&root)
            } else {
                terminal_score_for_loser(root.side_to_move)
            };
            self.progress.set_eval(score);
            debug!("no moves at root; score {score}");
            return SearchResult {
                best_score: score,
                nodes: 1,
                elapsed_ms: started_at.elapsed().as_millis() as u64,
                ..SearchResult::default()
            };
        }
        order_moves(&mut root_moves);

        let mut ctx = SearchContext {
            scorer: &self.scorer,
            yielder: &self.yielder,
            progress: &self.progress,
            // A deadline past what `Instant` can represent is no deadline.
            deadline: config.time_limit.and_then(|limit| started_at.checked_add(limit)),
            stop_flag: config.stop_flag.as_deref(),
            nodes: 0,
            unpublished_nodes: 0,
            timed_out: false,
        };
        let mut result = SearchResult::default();

        for depth in 1..=max_depth {
            if depth > 1 && ctx.should_abort() {
                result.aborted = true;
                break;
            }
            self.progress.set_depth(depth);

            let iteration = ctx.search_root(&mut root, &root_moves, depth);
            if iteration.complete {
                if let Some((mv, score)) = iteration.best {
                    result.best_move = Some(mv);
                    result.best_score = score;
                    result.reached_depth = depth;
                    self.progress.set_best_move(Some(mv));
                    self.progress.set_eval(score);
                    debug!("depth {depth} complete: {mv} score {score} nodes {}", ctx.nodes);
                }
                continue;
            }

            result.aborted = true;
            match iteration.best {
                Some((mv, score)) => {
                    trace!("depth {depth} aborted; adopting partial best {mv} ({score})");
                    result.best_move = Some(mv);
                    result.best_score = score;
                    self.progress.set_best_move(Some(mv));
                    self.progress.set_eval(score);
                }
                None => trace!("depth {depth} aborted before any root move finished"),
            }
            break;
        }

        ctx.flush_progress();
        result.nodes = ctx.nodes;
        result.elapsed_ms = started_at.elapsed().as_millis() as u64;
        info!(
            "search finished: depth {} best {} score {} nodes {} in {} ms{}",
            result.reached_depth,
            result.best_move.map_or_else(|| "none".to_owned(), |mv| mv.to_string()),
            result.best_score,
            result.nodes,
            result.elapsed_ms,
            if result.aborted { " (cut short)" } else { "" }
        );
        result
    }
}

/// Convenience wrapper with the standard scorer and no yielding.
pub fn find_best_move(game_state: &GameState, max_depth: u8, time_limit_seconds: f64) -> Option<Move> {
    SearchEngine::new().find_best_move(game_state, max_depth, time_limit_seconds)
}

struct RootIteration {
    best: Option<(Move, i32)>,
    complete: bool,
}

struct SearchContext<'a, S: BoardScorer, Y: SearchYield> {
    scorer: &'a S,
    yielder: &'a Y,
    progress: &'a SearchProgress,
    deadline: Option<Instant>,
    stop_flag: Option<&'a AtomicBool>,
    nodes: u64,
    unpublished_nodes: u64,
    /// Set once any node bailed out early; values above it are unreliable.
    timed_out: bool,
}

impl<S: BoardScorer, Y: SearchYield> SearchContext<'_, S, Y> {
    #[inline]
    fn should_abort(&self) -> bool {
        if let Some(limit) = self.deadline {
            if Instant::now() >= limit {
                return true;
            }
        }
        if let Some(flag) = self.stop_flag {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        false
    }

    #[inline]
    fn count_node(&mut self) {
        self.nodes += 1;
        self.unpublished_nodes += 1;
        if self.unpublished_nodes >= PROGRESS_NODE_BATCH {
            self.flush_progress();
        }
    }

    fn flush_progress(&mut self) {
        self.progress.add_nodes(self.unpublished_nodes);
        self.unpublished_nodes = 0;
    }

    fn search_root(&mut self, root: &mut GameState, root_moves: &[Move], depth: u8) -> RootIteration {
        let maximizing = root.side_to_move == Color::Light;
        let may_abort = depth > 1;
        let mut alpha = -INFINITY_SCORE;
        let mut beta = INFINITY_SCORE;
        let mut best: Option<(Move, i32)> = None;

        self.count_node();
        for &mv in root_moves {
            if may_abort && self.should_abort() {
                self.timed_out = true;
                return RootIteration { best, complete: false };
            }
            if !root.make_search_move(mv) {
                continue;
            }
            let score = self.alpha_beta(root, depth - 1, alpha, beta);
            root.unmake_search_move(mv);
            self.yielder.yield_now();

            if may_abort && self.timed_out {
                return RootIteration { best, complete: false };
            }

            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv, score));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        RootIteration { best, complete: true }
    }

    fn alpha_beta(&mut self, game_state: &mut GameState, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.count_node();

        if depth == 0 {
            return self.scorer.score(game_state);
        }
        if self.should_abort() {
            self.timed_out = true;
            return self.scorer.score(game_state);
        }

        let mut moves = generate_all_moves(game_state);
        if moves.is_empty() {
            return terminal_score_for_loser(game_state.side_to_move);
        }
        order_moves(&mut moves);

        let maximizing = game_state.side_to_move == Color::Light;
        let mut best = if maximizing { -INFINITY_SCORE } else { INFINITY_SCORE };
        let mut searched_any = false;

        for mv in moves {
            if !game_state.make_search_move(mv) {
                continue;
            }
            let score = self.alpha_beta(game_state, depth - 1, alpha, beta);
            game_state.unmake_search_move(mv);
            self.yielder.yield_now();
            searched_any = true;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if alpha >= beta {
                break;
            }
        }

        if searched_any {
            best
        } else {
            terminal_score_for_loser(game_state.side_to_move)
        }
    }
}
