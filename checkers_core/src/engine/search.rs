use crate::engine::config::{EngineConfig, MoveOrdering, MAX_DEPTH};
use crate::engine::eval::{loss_score, SimpleEvaluator};
use crate::engine::history::{HistoryKey, HistoryTable};
use crate::engine::{Evaluator, SearchStats, Searcher};
use crate::logic::board::Color;
use crate::logic::eval_constants::SCORE_INFINITY;
use crate::logic::state::BoardState;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Minimax search with alpha-beta pruning.
///
/// With `MoveOrdering::None` frames alternate between maximizing (dark) and
/// minimizing (light) and share the same bounds. With
/// `MoveOrdering::History` children are visited in ascending history order
/// and every frame maximizes the raw child values while receiving negated
/// bounds; the history table is credited with each frame's best child.
/// The two modes can disagree on the value of the same tree.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: Box<dyn Evaluator>,
    history_table: HistoryTable,
    open_nodes: HashSet<HistoryKey>,
    nodes_searched: u64,
    cutoffs: u64,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self::with_history(config, HistoryTable::new())
    }

    /// Engine that continues from an existing history table.
    pub fn with_history(config: Arc<EngineConfig>, history: HistoryTable) -> Self {
        Self {
            evaluator: Box::new(SimpleEvaluator::new(config.clone())),
            config,
            history_table: history,
            open_nodes: HashSet::new(),
            nodes_searched: 0,
            cutoffs: 0,
        }
    }

    pub fn with_evaluator(config: Arc<EngineConfig>, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            evaluator,
            ..Self::new(config)
        }
    }

    pub const fn history(&self) -> &HistoryTable {
        &self.history_table
    }

    pub fn into_history(self) -> HistoryTable {
        self.history_table
    }

    /// States entered by the last search and not yet released by an
    /// improving result in an ordered frame. Cleared when a search starts.
    pub fn open_nodes(&self) -> &HashSet<HistoryKey> {
        &self.open_nodes
    }

    /// One search frame. Writes the resulting score onto `state`.
    pub fn alpha_beta(
        &mut self,
        state: &BoardState,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 || state.is_terminal() {
            // Leaves are scored by the evaluator alone; a frame that finds
            // the side to move without moves scores the loss.
            let score = if depth > 0 && state.is_blocked() {
                loss_score(state.turn())
            } else {
                self.evaluator.evaluate(state)
            };
            state.set_score(score);
            return score;
        }

        assert!(
            !state.children().is_empty(),
            "non-terminal state without legal moves:\n{}",
            state.board()
        );

        let score = match self.config.move_ordering {
            MoveOrdering::History => self.ordered_frame(state, depth, alpha, beta),
            MoveOrdering::None if maximizing => self.max_frame(state, depth, alpha, beta),
            MoveOrdering::None => self.min_frame(state, depth, alpha, beta),
        };
        state.set_score(score);
        score
    }

    fn max_frame(&mut self, state: &BoardState, depth: u8, mut alpha: i32, beta: i32) -> i32 {
        let keying = self.config.history_key;
        let mut max_eval = -SCORE_INFINITY;

        for child in state.children() {
            self.nodes_searched += 1;
            self.open_nodes.insert(HistoryKey::of(child, keying));

            let eval = self.alpha_beta(child, depth - 1, alpha, beta, false);
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);

            if beta <= alpha {
                self.cutoffs += 1;
                break;
            }
        }
        max_eval
    }

    fn min_frame(&mut self, state: &BoardState, depth: u8, alpha: i32, mut beta: i32) -> i32 {
        let keying = self.config.history_key;
        let mut min_eval = SCORE_INFINITY;

        for child in state.children() {
            self.nodes_searched += 1;
            self.open_nodes.insert(HistoryKey::of(child, keying));

            let eval = self.alpha_beta(child, depth - 1, alpha, beta, true);
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);

            if beta <= alpha {
                self.cutoffs += 1;
                break;
            }
        }
        min_eval
    }

    fn ordered_frame(&mut self, state: &BoardState, depth: u8, alpha: i32, beta: i32) -> i32 {
        let keying = self.config.history_key;
        let ordered = self.history_table.order_by_score(state.children(), keying);
        let mut max_eval = -SCORE_INFINITY;
        let mut best_child = None;

        for child in ordered {
            self.nodes_searched += 1;
            let key = HistoryKey::of(child, keying);
            self.open_nodes.insert(key);

            let eval = self.alpha_beta(child, depth - 1, -alpha, -beta, true);
            if eval > max_eval {
                max_eval = eval;
                best_child = Some(key);
            }

            if max_eval > alpha {
                self.open_nodes.remove(&key);
            }

            if beta <= alpha {
                self.cutoffs += 1;
                break;
            }
        }

        if let Some(key) = best_child {
            self.history_table.record(key, depth);
            log::trace!("history credit {key:?} at depth {depth}");
        }
        max_eval
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(&mut self, state: &BoardState, depth: u8) -> SearchStats {
        debug_assert!(depth <= MAX_DEPTH, "search depth {depth} above {MAX_DEPTH}");
        self.nodes_searched = 0;
        self.cutoffs = 0;
        self.open_nodes.clear();
        let start = Instant::now();

        let maximizing = state.turn() == Color::Dark;
        let score = self.alpha_beta(state, depth, -SCORE_INFINITY, SCORE_INFINITY, maximizing);

        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            cutoffs: self.cutoffs,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        log::debug!(
            "search depth={} ordering={:?} score={} nodes={} cutoffs={} time_ms={}",
            stats.depth,
            self.config.move_ordering,
            score,
            stats.nodes,
            stats.cutoffs,
            stats.time_ms
        );
        stats
    }
}
