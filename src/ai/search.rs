//! Adversarial search over isolation positions: plain minimax, minimax with
//! alpha-beta pruning, and an iterative-deepening driver.
//!
//! Values follow the fixed PlayerOne/PlayerTwo labeling of
//! [`GameState::utility`]: PlayerOne maximizes, PlayerTwo minimizes. A root
//! decision therefore maximizes when PlayerOne is to move and minimizes
//! otherwise. Every search works on clones and never touches the caller's
//! state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::{GameState, Position, Side};

use super::heuristic::{Heuristic, Mobility};

/// Which search a [`SearchEngine`] caller wants to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Minimax,
    #[default]
    AlphaBeta,
    IterativeDeepening,
}

/// Depth that lets every line of play reach a terminal position: each move
/// fills a cell, so a game cannot last longer than the free cells remaining.
pub fn unbounded_depth(state: &GameState) -> usize {
    state.board().free_count() + 1
}

/// Minimax search engine with a pluggable cutoff heuristic.
pub struct SearchEngine {
    heuristic: Box<dyn Heuristic>,
    nodes: u64,
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine {
            heuristic: Box::new(Mobility),
            nodes: 0,
        }
    }

    pub fn with_heuristic(heuristic: Box<dyn Heuristic>) -> Self {
        SearchEngine { heuristic, nodes: 0 }
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Run `algorithm`. `depth` of `None` searches to the end of the game.
    pub fn decide(
        &mut self,
        algorithm: Algorithm,
        state: &GameState,
        depth: Option<usize>,
    ) -> Option<Position> {
        let depth = depth.unwrap_or_else(|| unbounded_depth(state));
        match algorithm {
            Algorithm::Minimax => self.minimax_decision(state, depth),
            Algorithm::AlphaBeta => self.alpha_beta_decision(state, depth),
            Algorithm::IterativeDeepening => self.get_actions(state, depth),
        }
    }

    /// Depth-limited minimax. Returns `None` when the side to move is stuck.
    /// Ties keep the first move in generation order.
    pub fn minimax_decision(&mut self, state: &GameState, depth: usize) -> Option<Position> {
        self.nodes = 0;
        let maximizing = state.active_side() == Side::PlayerOne;
        let child_depth = depth.saturating_sub(1);

        let mut best: Option<(Position, f64)> = None;
        for mv in state.legal_moves() {
            let next = state.successor(mv);
            let value = if maximizing {
                self.min_value(&next, child_depth)
            } else {
                self.max_value(&next, child_depth)
            };
            if improves(best, value, maximizing) {
                best = Some((mv, value));
            }
        }

        debug!(
            algorithm = "minimax",
            depth,
            nodes = self.nodes,
            best = ?best,
            "search finished"
        );
        best.map(|(mv, _)| mv)
    }

    fn max_value(&mut self, state: &GameState, depth: usize) -> f64 {
        self.nodes += 1;
        if state.is_terminal() {
            return state.utility();
        }
        if depth == 0 {
            return self.heuristic.evaluate(state);
        }

        let mut value = f64::NEG_INFINITY;
        for mv in state.legal_moves() {
            let next = state.successor(mv);
            value = value.max(self.min_value(&next, depth - 1));
        }
        value
    }

    fn min_value(&mut self, state: &GameState, depth: usize) -> f64 {
        self.nodes += 1;
        if state.is_terminal() {
            return state.utility();
        }
        if depth == 0 {
            return self.heuristic.evaluate(state);
        }

        let mut value = f64::INFINITY;
        for mv in state.legal_moves() {
            let next = state.successor(mv);
            value = value.min(self.max_value(&next, depth - 1));
        }
        value
    }

    /// Alpha-beta search to the end of the game.
    pub fn alpha_beta_search(&mut self, state: &GameState) -> Option<Position> {
        self.alpha_beta_decision(state, unbounded_depth(state))
    }

    /// Depth-limited alpha-beta. Picks the same move as
    /// [`minimax_decision`](Self::minimax_decision) at the same depth.
    pub fn alpha_beta_decision(&mut self, state: &GameState, depth: usize) -> Option<Position> {
        self.nodes = 0;
        let maximizing = state.active_side() == Side::PlayerOne;
        let child_depth = depth.saturating_sub(1);
        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;

        let mut best: Option<(Position, f64)> = None;
        for mv in state.legal_moves() {
            let next = state.successor(mv);
            let value = if maximizing {
                self.ab_min_value(&next, child_depth, alpha, beta)
            } else {
                self.ab_max_value(&next, child_depth, alpha, beta)
            };
            if improves(best, value, maximizing) {
                best = Some((mv, value));
            }
            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
        }

        debug!(
            algorithm = "alpha-beta",
            depth,
            nodes = self.nodes,
            best = ?best,
            "search finished"
        );
        best.map(|(mv, _)| mv)
    }

    fn ab_max_value(
        &mut self,
        state: &GameState,
        depth: usize,
        mut alpha: f64,
        beta: f64,
    ) -> f64 {
        self.nodes += 1;
        if state.is_terminal() {
            return state.utility();
        }
        if depth == 0 {
            return self.heuristic.evaluate(state);
        }

        let mut value = f64::NEG_INFINITY;
        for mv in state.legal_moves() {
            let next = state.successor(mv);
            value = value.max(self.ab_min_value(&next, depth - 1, alpha, beta));
            if value >= beta {
                return value;
            }
            alpha = alpha.max(value);
        }
        value
    }

    fn ab_min_value(
        &mut self,
        state: &GameState,
        depth: usize,
        alpha: f64,
        mut beta: f64,
    ) -> f64 {
        self.nodes += 1;
        if state.is_terminal() {
            return state.utility();
        }
        if depth == 0 {
            return self.heuristic.evaluate(state);
        }

        let mut value = f64::INFINITY;
        for mv in state.legal_moves() {
            let next = state.successor(mv);
            value = value.min(self.ab_max_value(&next, depth - 1, alpha, beta));
            if value <= alpha {
                return value;
            }
            beta = beta.min(value);
        }
        value
    }

    /// Iterative deepening: minimax at depths `1..=min_depth`, keeping the
    /// deepest answer.
    pub fn get_actions(&mut self, state: &GameState, min_depth: usize) -> Option<Position> {
        let mut best = None;
        for depth in 1..=min_depth.max(1) {
            best = self.minimax_decision(state, depth);
            debug!(depth, best = ?best, "iterative deepening step");
            if best.is_none() {
                break;
            }
        }
        best
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Strict improvement, so the first of several equal moves is kept.
fn improves(best: Option<(Position, f64)>, value: f64, maximizing: bool) -> bool {
    match best {
        None => true,
        Some((_, current)) if maximizing => value > current,
        Some((_, current)) => value < current,
    }
}
