use std::io::{self, BufRead, Stdout, Write};

use tracing::warn;

use crate::error::{AgentError, GameError};
use crate::game::{GameState, PlayerKind, Position};

use super::agent::Agent;

/// Where a [`HumanAgent`] reads its input lines from.
pub trait LineSource {
    /// Append the next line to `buf`; returns 0 at end of input.
    fn next_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<R: BufRead> LineSource for R {
    fn next_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Process stdin, locked only for the duration of each read so several
/// agents can share it.
pub struct StdinLines;

impl LineSource for StdinLines {
    fn next_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::stdin().read_line(buf)
    }
}

/// A person entering moves such as `B3` on a line-oriented terminal.
///
/// Input is checked against the current legal moves before it is returned;
/// anything else is reported and asked for again. `resign`, `quit`, or end of
/// input concede the game.
pub struct HumanAgent<R, W> {
    name: String,
    input: R,
    output: W,
}

impl HumanAgent<StdinLines, Stdout> {
    pub fn stdio(name: impl Into<String>) -> Self {
        HumanAgent::new(name, StdinLines, io::stdout())
    }
}

impl<R: LineSource, W: Write> HumanAgent<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        HumanAgent {
            name: name.into(),
            input,
            output,
        }
    }

    /// Get the output sink back, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, legal: &[Position]) -> io::Result<()> {
        let listed: Vec<String> = legal.iter().map(Position::to_string).collect();
        writeln!(self.output, "{}, your move. Legal: {}", self.name, listed.join(" "))?;
        write!(self.output, "> ")?;
        self.output.flush()
    }
}

impl<R: LineSource, W: Write> Agent for HumanAgent<R, W> {
    fn decide(&mut self, state: &GameState) -> Result<Position, AgentError> {
        let legal = state.legal_moves();
        write!(self.output, "{state}")?;

        loop {
            self.prompt(&legal)?;

            let mut line = String::new();
            if self.input.next_line(&mut line)? == 0 {
                return Err(AgentError::Resigned);
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("resign") || line.eq_ignore_ascii_case("quit") {
                return Err(AgentError::Resigned);
            }

            match line.parse::<Position>() {
                Ok(pos) if legal.contains(&pos) => return Ok(pos),
                Ok(pos) => writeln!(self.output, "{pos} is not a legal move, try again.")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn on_rejected(&mut self, position: Position, error: &GameError) {
        warn!(player = %self.name, %position, %error, "move rejected");
        if let Err(err) = writeln!(self.output, "Move {position} rejected: {error}") {
            warn!(player = %self.name, error = %err, "could not report rejected move");
        }
    }
}
