//! # Isolation
//!
//! A two-player isolation board game. Players take turns sliding like a queen
//! across a grid; every cell they land on stays blocked, and the first player
//! left without a legal move loses. The computer player searches the game tree
//! with minimax, alpha-beta pruning, or iterative deepening.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, positions, players, move generation, state
//! - [`ai`]: Agent trait, human prompt, search engine, heuristics
//! - [`manager`]: Turn loop and game lifecycle
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod manager;
