use serde::{Deserialize, Serialize};

use crate::game::{GameState, Side};

/// Trait for scoring a non-terminal position where the search depth ran out.
/// Scores are finite; terminal positions are scored by `GameState::utility`.
pub trait Heuristic: Send {
    fn evaluate(&self, state: &GameState) -> f64;
}

/// Number of legal moves left to the side to move.
pub struct Mobility;

impl Heuristic for Mobility {
    fn evaluate(&self, state: &GameState) -> f64 {
        state.mobility(state.active_side()) as f64
    }
}

/// PlayerOne's legal-move count minus PlayerTwo's, so the score reads the same
/// way as the terminal utility.
pub struct MobilityDifference;

impl Heuristic for MobilityDifference {
    fn evaluate(&self, state: &GameState) -> f64 {
        state.mobility(Side::PlayerOne) as f64 - state.mobility(Side::PlayerTwo) as f64
    }
}

/// Heuristic selector for configuration and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    #[default]
    Mobility,
    MobilityDifference,
}

impl HeuristicKind {
    pub fn build(self) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Mobility => Box::new(Mobility),
            HeuristicKind::MobilityDifference => Box::new(MobilityDifference),
        }
    }
}
