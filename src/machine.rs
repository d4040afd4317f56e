//! This module defines the `TuringMachine` struct, which simulates a deterministic single-tape
//! Turing machine. It handles the machine's state, tape operations, head movement, and the
//! halting and boundary policy selected by the program's [`Profile`].

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::analyzer::{analyze, start_state};
use crate::tape::Tape;
use crate::types::{Direction, Halt, MachineError, Outcome, Profile, Program, Rule, Step};

/// Represents a single-tape Turing machine.
///
/// The machine owns its tape exclusively. A machine is built from a validated [`Program`]
/// and can be run once, or [`reset`](TuringMachine::reset) and run again.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    program: Program,
    start: String,
    accepting: HashSet<String>,
    state: String,
    tape: Tape,
    head: isize,
    step_count: usize,
    halt: Option<Halt>,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from a `Program`.
    ///
    /// The program is analyzed first; a missing start state, an inconsistent rule table,
    /// or any other validation failure aborts construction before the tape is touched.
    pub fn new(program: Program) -> Result<Self, MachineError> {
        analyze(&program)?;
        let start = start_state(&program)?;

        let accepting = program
            .states()
            .into_iter()
            .filter(|state| state.is_accepting())
            .map(|state| state.name().to_string())
            .collect();

        debug!(
            program = %program.name,
            start = %start,
            rules = program.rules.len(),
            tape = %program.tape,
            "machine constructed"
        );

        Ok(Self {
            state: start.clone(),
            start,
            accepting,
            tape: program.tape.clone(),
            head: program.head as isize,
            step_count: 0,
            halt: None,
            program,
        })
    }

    /// Executes a single transition.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if a transition was applied.
    /// * `Ok(Step::Halt(_))` if the machine is (now) halted. A missing rule halts with
    ///   `Halt::Reject` without touching the tape.
    /// * `Err(MachineError::IndexOutOfRange)` if a bounded head has left the tape.
    pub fn step(&mut self) -> Result<Step, MachineError> {
        if let Some(halt) = self.halted() {
            return Ok(Step::Halt(halt));
        }

        let cell = self.cell()?;
        let symbol = self.tape.read(cell)?;

        let Some(rule) = self.transition(symbol).cloned() else {
            return Ok(Step::Halt(self.reject(symbol)));
        };

        self.tape.write(cell, rule.write_symbol)?;
        self.head += match rule.direction {
            Direction::Left => -1,
            Direction::Right => 1,
        };
        self.state = rule.next_state.name().to_string();
        self.step_count += 1;

        if matches!(self.program.profile, Profile::Unbounded) {
            if self.head == self.tape.len() as isize {
                self.tape.extend_right(self.program.blank);
            } else if self.head == -1 {
                self.head = 0;
            }
        }

        trace!(
            step = self.step_count,
            read = %symbol,
            write = %rule.write_symbol,
            direction = ?rule.direction,
            state = %self.state,
            head = self.head,
            "transition"
        );

        Ok(Step::Continue)
    }

    /// Runs the machine until it halts.
    ///
    /// Without a configured `max_steps` a machine whose rules cycle forever never returns.
    /// With one, reaching the cap while another transition would still apply yields
    /// `MachineError::StepLimitExceeded`.
    pub fn run(&mut self) -> Result<Outcome, MachineError> {
        loop {
            if let Some(limit) = self.program.max_steps {
                if self.step_count >= limit && self.has_transition() {
                    warn!(program = %self.program.name, limit, "step limit exceeded");
                    return Err(MachineError::StepLimitExceeded(limit));
                }
            }

            match self.step()? {
                Step::Continue => continue,
                Step::Halt(halt) => {
                    debug!(
                        program = %self.program.name,
                        %halt,
                        state = %self.state,
                        steps = self.step_count,
                        "machine halted"
                    );
                    return Ok(self.outcome(halt));
                }
            }
        }
    }

    /// Runs the machine and returns only the resulting tape.
    pub fn simulate(&mut self) -> Result<String, MachineError> {
        self.run().map(|outcome| outcome.tape)
    }

    /// Runs the machine and returns the resulting tape together with the final state.
    pub fn execute(&mut self) -> Result<(String, String), MachineError> {
        self.run().map(|outcome| (outcome.tape, outcome.state))
    }

    /// Returns how the machine halted, or `None` while it is still running.
    pub fn halted(&self) -> Option<Halt> {
        if self.halt.is_some() {
            return self.halt;
        }

        match &self.program.profile {
            Profile::Unbounded => self.accepting.contains(&self.state).then_some(Halt::Accept),
            Profile::Bounded(bounds) => {
                if self.state == bounds.accept {
                    Some(Halt::Accept)
                } else if self.state == bounds.reject {
                    Some(Halt::Reject)
                } else {
                    None
                }
            }
        }
    }

    /// Checks if the machine is currently halted.
    pub fn is_halted(&self) -> bool {
        self.halted().is_some()
    }

    /// Returns `true` if the next `step` would apply a transition.
    pub fn has_transition(&self) -> bool {
        self.halted().is_none()
            && self
                .symbol()
                .is_some_and(|symbol| self.transition(symbol).is_some())
    }

    /// Finds the first rule applying to the current state and `symbol`.
    pub fn transition(&self, symbol: char) -> Option<&Rule> {
        self.program
            .rules
            .iter()
            .find(|rule| rule.applies_to(&self.state, symbol))
    }

    /// Resets the machine to its initial configuration.
    pub fn reset(&mut self) {
        self.state = self.start.clone();
        self.tape = self.program.tape.clone();
        self.head = self.program.head as isize;
        self.step_count = 0;
        self.halt = None;
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the start state of the machine.
    pub fn initial_state(&self) -> &str {
        &self.start
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the head position. Only a bounded machine that ran off the left end
    /// reports a negative position.
    pub fn head(&self) -> isize {
        self.head
    }

    /// Returns the symbol under the head, if the head is on the tape.
    pub fn symbol(&self) -> Option<char> {
        usize::try_from(self.head)
            .ok()
            .and_then(|cell| self.tape.read(cell).ok())
    }

    /// Returns the total number of transitions applied.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Renders the tape as reported to callers; bounded sentinels are excluded.
    pub fn tape_content(&self) -> String {
        match self.program.profile {
            Profile::Unbounded => self.tape.to_string(),
            Profile::Bounded(_) => self.tape.interior(),
        }
    }

    fn cell(&self) -> Result<usize, MachineError> {
        usize::try_from(self.head).map_err(|_| MachineError::IndexOutOfRange {
            index: self.head,
            len: self.tape.len(),
        })
    }

    fn reject(&mut self, symbol: char) -> Halt {
        debug!(state = %self.state, %symbol, head = self.head, "no applicable rule");

        if let Profile::Bounded(bounds) = &self.program.profile {
            self.state = bounds.reject.clone();
        }
        self.halt = Some(Halt::Reject);
        Halt::Reject
    }

    fn outcome(&self, halt: Halt) -> Outcome {
        Outcome {
            halt,
            state: self.state.clone(),
            tape: self.tape_content(),
            steps: self.step_count,
        }
    }
}
