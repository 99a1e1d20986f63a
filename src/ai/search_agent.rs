use crate::error::AgentError;
use crate::game::{GameState, PlayerKind, Position};

use super::agent::Agent;
use super::heuristic::Heuristic;
use super::search::{Algorithm, SearchEngine};

/// Computer player backed by [`SearchEngine`].
pub struct SearchAgent {
    name: String,
    engine: SearchEngine,
    algorithm: Algorithm,
    depth: Option<usize>,
}

impl SearchAgent {
    /// `depth` of `None` searches every line to the end of the game.
    pub fn new(name: impl Into<String>, algorithm: Algorithm, depth: Option<usize>) -> Self {
        SearchAgent {
            name: name.into(),
            engine: SearchEngine::new(),
            algorithm,
            depth,
        }
    }

    pub fn with_heuristic(mut self, heuristic: Box<dyn Heuristic>) -> Self {
        self.engine = SearchEngine::with_heuristic(heuristic);
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl Agent for SearchAgent {
    fn decide(&mut self, state: &GameState) -> Result<Position, AgentError> {
        // A stuck player has nothing to search; concede.
        self.engine
            .decide(self.algorithm, state, self.depth)
            .ok_or(AgentError::Resigned)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Computer
    }
}
