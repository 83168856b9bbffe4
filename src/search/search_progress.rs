//! Observable search progress and the background search handle.
//!
//! A host polls `SearchProgress` while the search runs on a worker thread.
//! Cancellation sets the shared stop flag; the search notices it at its next
//! time check and returns the deepest completed result.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::GameState;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::PieceSquareScorer;
use crate::search::iterative_deepening::{SearchConfig, SearchEngine, SearchResult, ThreadYield};

/// Recursion depth is bounded by `MAX_SEARCH_DEPTH`, but each frame carries
/// a move list; give the worker plenty of room.
const SEARCH_THREAD_STACK_BYTES: usize = 64 * 1024 * 1024;

/// Progress fields published by a running search.
#[derive(Debug, Default)]
pub struct SearchProgress {
    current_depth: AtomicU8,
    current_eval: AtomicI32,
    nodes: AtomicU64,
    best_move_so_far: Mutex<Option<Move>>,
}

impl SearchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth currently being searched (0 before the first iteration).
    #[inline]
    pub fn current_depth(&self) -> u8 {
        self.current_depth.load(Ordering::Relaxed)
    }

    /// Score of the deepest completed iteration.
    #[inline]
    pub fn current_eval(&self) -> i32 {
        self.current_eval.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn best_move_so_far(&self) -> Option<Move> {
        *self
            .best_move_so_far
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn reset(&self) {
        self.current_depth.store(0, Ordering::Relaxed);
        self.current_eval.store(0, Ordering::Relaxed);
        self.nodes.store(0, Ordering::Relaxed);
        self.set_best_move(None);
    }

    #[inline]
    pub(crate) fn set_depth(&self, depth: u8) {
        self.current_depth.store(depth, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn set_eval(&self, eval: i32) {
        self.current_eval.store(eval, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add_nodes(&self, nodes: u64) {
        self.nodes.fetch_add(nodes, Ordering::Relaxed);
    }

    pub(crate) fn set_best_move(&self, mv: Option<Move>) {
        *self
            .best_move_so_far
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = mv;
    }
}

/// A search running on its own thread.
#[derive(Debug)]
pub struct SearchHandle {
    progress: Arc<SearchProgress>,
    stop_flag: Arc<AtomicBool>,
    worker: JoinHandle<SearchResult>,
}

impl SearchHandle {
    pub fn progress(&self) -> &SearchProgress {
        &self.progress
    }

    /// Ask the search to stop at its next time check.
    pub fn cancel(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker and return its result.
    pub fn join(self) -> ChessResult<SearchResult> {
        self.worker
            .join()
            .map_err(|_| ChessError::SearchThread("search worker panicked".to_owned()))
    }
}

/// Search an owned copy of a position on a background thread.
///
/// The worker yields after every explored child so a host thread doing
/// input handling stays responsive.
pub fn spawn_search(game_state: GameState, mut config: SearchConfig) -> ChessResult<SearchHandle> {
    let stop_flag = config
        .stop_flag
        .get_or_insert_with(|| Arc::new(AtomicBool::new(false)))
        .clone();
    let progress = Arc::new(SearchProgress::new());
    let engine = SearchEngine::with_parts(PieceSquareScorer::standard(), ThreadYield)
        .with_progress(Arc::clone(&progress));

    let worker = thread::Builder::new()
        .name("drawback-search".to_owned())
        .stack_size(SEARCH_THREAD_STACK_BYTES)
        .spawn(move || engine.search(&game_state, &config))
        .map_err(|err| ChessError::SearchThread(err.to_string()))?;
    debug!("spawned background search");

    Ok(SearchHandle {
        progress,
        stop_flag,
        worker,
    })
}

#[cfg(test)]
mod tests {
    use super::{spawn_search, SearchProgress};
    use crate::game_state::chess_types::GameState;
    use crate::move_generation::move_generator::generate_all_moves;
    use crate::search::iterative_deepening::SearchConfig;

    #[test]
    fn background_search_reports_progress_and_result() {
        let game = GameState::new_game();
        let handle = spawn_search(game.clone(), SearchConfig::unbounded(3)).expect("spawn");
        let result = handle.join().expect("worker should finish");
        let best = result.best_move.expect("start position has moves");
        assert!(generate_all_moves(&game).contains(&best));
        assert_eq!(result.reached_depth, 3);
    }

    #[test]
    fn cancelled_search_still_returns_a_move() {
        let game = GameState::new_game();
        let handle = spawn_search(game.clone(), SearchConfig::unbounded(64)).expect("spawn");
        while handle.progress().current_depth() < 2 && !handle.is_finished() {
            std::thread::yield_now();
        }
        handle.cancel();
        let result = handle.join().expect("worker should finish");
        assert!(result.best_move.is_some());
        assert!(result.reached_depth >= 1);
    }

    #[test]
    fn fresh_progress_is_empty() {
        let progress = SearchProgress::new();
        assert_eq!(progress.current_depth(), 0);
        assert_eq!(progress.nodes(), 0);
        assert!(progress.best_move_so_far().is_none());
    }
}
