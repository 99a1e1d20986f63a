//! Turn loop: asks the active player's agent for a move, applies it, and
//! tracks the game through NotStarted → InProgress → Over.

use tracing::{info, warn};

use crate::ai::Agent;
use crate::error::{AgentError, ManagerError};
use crate::game::{GameState, PlayerKind, Position, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Over,
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub winner: Side,
    pub winner_name: String,
    pub loser_name: String,
    pub moves: usize,
    pub resigned: bool,
}

pub struct GameManager {
    state: GameState,
    agents: [Box<dyn Agent>; 2],
    phase: Phase,
    resigned: Option<Side>,
    moves: usize,
}

impl GameManager {
    /// `agent_one` decides for PlayerOne, `agent_two` for PlayerTwo.
    pub fn new(state: GameState, agent_one: Box<dyn Agent>, agent_two: Box<dyn Agent>) -> Self {
        GameManager {
            state,
            agents: [agent_one, agent_two],
            phase: Phase::NotStarted,
            resigned: None,
            moves: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Moves accepted so far.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Leave NotStarted. A position where the first mover is already stuck
    /// goes straight to Over.
    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            return;
        }
        info!(
            player_one = %self.state.player(Side::PlayerOne),
            player_two = %self.state.player(Side::PlayerTwo),
            first = self.state.active_player().name(),
            "game started"
        );
        self.phase = Phase::InProgress;
        self.check_over();
    }

    /// Play one turn. Returns the accepted move, or `None` when the active
    /// player resigned.
    ///
    /// Moves a human agent gets wrong are reported back to it and asked for
    /// again without changing the game. A computer agent producing a rejected
    /// move ends the game with [`ManagerError::AgentDefect`].
    pub fn play_turn(&mut self) -> Result<Option<Position>, ManagerError> {
        if self.phase == Phase::NotStarted {
            self.start();
        }
        if self.phase != Phase::InProgress {
            return Err(ManagerError::NotInProgress);
        }

        let side = self.state.active_side();
        let agent = &mut self.agents[side.index()];

        loop {
            let position = match agent.decide(&self.state) {
                Ok(position) => position,
                Err(AgentError::Resigned) => {
                    info!(player = agent.name(), "player resigned");
                    self.resigned = Some(side);
                    self.phase = Phase::Over;
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            };

            match self.state.apply_move_mut(position) {
                Ok(()) => {
                    self.moves += 1;
                    info!(
                        player = agent.name(),
                        %position,
                        move_number = self.moves,
                        "move played"
                    );
                    self.check_over();
                    return Ok(Some(position));
                }
                Err(err) if agent.kind() == PlayerKind::Human => {
                    agent.on_rejected(position, &err);
                }
                Err(err) => {
                    warn!(
                        player = agent.name(),
                        %position,
                        error = %err,
                        "automated player produced a rejected move"
                    );
                    self.phase = Phase::Over;
                    return Err(ManagerError::AgentDefect {
                        agent: agent.name().to_string(),
                        position,
                        source: err,
                    });
                }
            }
        }
    }

    /// Play turns until the game is over.
    pub fn run(&mut self) -> Result<GameReport, ManagerError> {
        self.start();
        while self.phase == Phase::InProgress {
            self.play_turn()?;
        }
        self.report().ok_or(ManagerError::NotInProgress)
    }

    /// Result of the game once it is over.
    pub fn report(&self) -> Option<GameReport> {
        if self.phase != Phase::Over {
            return None;
        }
        let winner = match self.resigned {
            Some(side) => side.other(),
            None => self.state.winner()?,
        };
        Some(GameReport {
            winner,
            winner_name: self.state.player(winner).name().to_string(),
            loser_name: self.state.player(winner.other()).name().to_string(),
            moves: self.moves,
            resigned: self.resigned.is_some(),
        })
    }

    fn check_over(&mut self) {
        if let Some(winner) = self.state.winner() {
            self.phase = Phase::Over;
            info!(
                winner = self.state.player(winner).name(),
                moves = self.moves,
                "game over"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{Algorithm, RandomAgent, SearchAgent};
    use crate::error::GameError;
    use crate::game::{Board, Player};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Plays a fixed list of moves and records the ones that were rejected.
    struct Scripted {
        kind: PlayerKind,
        moves: VecDeque<Position>,
        rejected: Rc<RefCell<Vec<Position>>>,
    }

    impl Scripted {
        fn new(kind: PlayerKind, moves: &[(usize, usize)]) -> Self {
            Scripted {
                kind,
                moves: moves.iter().map(|&m| m.into()).collect(),
                rejected: Rc::default(),
            }
        }
    }

    impl Agent for Scripted {
        fn decide(&mut self, _state: &GameState) -> Result<Position, AgentError> {
            self.moves.pop_front().ok_or(AgentError::Resigned)
        }

        fn name(&self) -> &str {
            "scripted"
        }

        fn kind(&self) -> PlayerKind {
            self.kind
        }

        fn on_rejected(&mut self, position: Position, _error: &GameError) {
            self.rejected.borrow_mut().push(position);
        }
    }

    fn new_state(width: usize, height: usize) -> GameState {
        GameState::new(
            Board::new(width, height).unwrap(),
            Player::new("P1", PlayerKind::Human),
            Player::new("P2", PlayerKind::Computer),
            Side::PlayerOne,
        )
    }

    #[test]
    fn forced_game_ends_when_mover_is_stuck() {
        let one = Scripted::new(PlayerKind::Human, &[(0, 0), (0, 1), (0, 2)]);
        let two = Scripted::new(PlayerKind::Computer, &[(1, 0), (1, 1), (1, 2)]);
        let mut manager = GameManager::new(new_state(3, 2), Box::new(one), Box::new(two));
        assert_eq!(manager.phase(), Phase::NotStarted);

        for turn in 0..6 {
            assert!(manager.play_turn().unwrap().is_some());
            let expected = if turn < 5 { Phase::InProgress } else { Phase::Over };
            assert_eq!(manager.phase(), expected, "after turn {turn}");
        }

        let report = manager.report().unwrap();
        assert_eq!(report.winner, Side::PlayerTwo);
        assert_eq!(report.winner_name, "P2");
        assert_eq!(report.loser_name, "P1");
        assert_eq!(report.moves, 6);
        assert!(!report.resigned);
        assert!(matches!(manager.play_turn(), Err(ManagerError::NotInProgress)));
    }

    #[test]
    fn human_illegal_move_is_retried() {
        // P1 first lands on A1; its second move C2 is off every line from A1.
        let one = Scripted::new(PlayerKind::Human, &[(0, 0), (1, 2), (5, 5), (0, 1)]);
        let rejected = Rc::clone(&one.rejected);
        let two = Scripted::new(PlayerKind::Computer, &[(2, 2)]);
        let mut manager = GameManager::new(new_state(3, 3), Box::new(one), Box::new(two));

        manager.play_turn().unwrap();
        manager.play_turn().unwrap();
        let before = manager.state().clone();
        assert_eq!(manager.play_turn().unwrap(), Some(Position::new(0, 1)));

        assert_eq!(*rejected.borrow(), vec![Position::new(1, 2), Position::new(5, 5)]);
        assert_eq!(before.board().free_count(), manager.state().board().free_count() + 1);
        assert_eq!(manager.phase(), Phase::InProgress);
    }

    #[test]
    fn computer_illegal_move_aborts() {
        let one = Scripted::new(PlayerKind::Human, &[(0, 0)]);
        let two = Scripted::new(PlayerKind::Computer, &[(0, 0)]);
        let mut manager = GameManager::new(new_state(3, 3), Box::new(one), Box::new(two));

        manager.play_turn().unwrap();
        let err = manager.play_turn().unwrap_err();
        assert!(matches!(
            err,
            ManagerError::AgentDefect { source: GameError::IllegalMove(_), .. }
        ));
        assert_eq!(manager.phase(), Phase::Over);
        assert_eq!(manager.report(), None);
    }

    #[test]
    fn resignation_hands_the_win_to_the_opponent() {
        let one = Scripted::new(PlayerKind::Human, &[]);
        let two = Scripted::new(PlayerKind::Computer, &[]);
        let mut manager = GameManager::new(new_state(3, 3), Box::new(one), Box::new(two));

        let report = manager.run().unwrap();
        assert_eq!(report.winner, Side::PlayerTwo);
        assert!(report.resigned);
        assert_eq!(report.moves, 0);
    }

    #[test]
    fn search_vs_random_runs_to_completion() {
        let mut manager = GameManager::new(
            new_state(4, 4),
            Box::new(SearchAgent::new("search", Algorithm::AlphaBeta, Some(3))),
            Box::new(RandomAgent::seeded(3)),
        );
        let report = manager.run().unwrap();
        assert!(!report.resigned);
        assert_eq!(manager.phase(), Phase::Over);
        assert!(manager.state().is_terminal());
        assert_eq!(report.moves, manager.state().move_count());
    }
}
