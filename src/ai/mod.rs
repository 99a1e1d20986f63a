//! Move-decision agents and the adversarial search behind the computer
//! player.

mod agent;
mod heuristic;
mod human;
mod random;
pub mod search;
mod search_agent;

pub use agent::Agent;
pub use heuristic::{Heuristic, HeuristicKind, Mobility, MobilityDifference};
pub use human::{HumanAgent, LineSource, StdinLines};
pub use random::RandomAgent;
pub use search::{Algorithm, SearchEngine};
pub use search_agent::SearchAgent;
