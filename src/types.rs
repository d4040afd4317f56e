//! This module defines the core data structures and types used throughout the simulator,
//! including states, transition rules, program configuration, execution results, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::tape::Tape;

/// The default blank symbol used to extend and pad the tape.
pub const BLANK_SYMBOL: char = '_';

/// A named automaton state.
///
/// States are keyed by name. Every reference to the same name inside one program must
/// carry the same flags, which the analyzer checks before a machine is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    name: String,
    is_start: bool,
    is_accepting: bool,
}

impl State {
    /// Creates an ordinary (neither start nor accepting) state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_start: false,
            is_accepting: false,
        }
    }

    /// Creates the start state.
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            is_start: true,
            ..Self::new(name)
        }
    }

    /// Creates an accepting state.
    pub fn accepting(name: impl Into<String>) -> Self {
        Self {
            is_accepting: true,
            ..Self::new(name)
        }
    }

    pub fn with_start(mut self, is_start: bool) -> Self {
        self.is_start = is_start;
        self
    }

    pub fn with_accepting(mut self, is_accepting: bool) -> Self {
        self.is_accepting = is_accepting;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_accepting(&self) -> bool {
        self.is_accepting
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl TryFrom<char> for Direction {
    type Error = MachineError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'L' | 'l' => Ok(Direction::Left),
            'R' | 'r' => Ok(Direction::Right),
            other => Err(MachineError::ValidationError(format!(
                "Invalid direction '{}', expected 'L' or 'R'",
                other
            ))),
        }
    }
}

impl FromStr for Direction {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Direction::try_from(c),
            _ => Err(MachineError::ValidationError(format!(
                "Invalid direction '{}', expected 'L' or 'R'",
                s
            ))),
        }
    }
}

/// A single transition: `(current_state, read_symbol) -> (next_state, write_symbol, direction)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub current_state: State,
    pub read_symbol: char,
    pub next_state: State,
    pub write_symbol: char,
    pub direction: Direction,
}

impl Rule {
    pub fn new(
        current_state: &State,
        read_symbol: char,
        next_state: &State,
        write_symbol: char,
        direction: Direction,
    ) -> Self {
        Self {
            current_state: current_state.clone(),
            read_symbol,
            next_state: next_state.clone(),
            write_symbol,
            direction,
        }
    }

    /// Returns `true` if this rule fires in `state` when the head reads `symbol`.
    pub fn applies_to(&self, state: &str, symbol: char) -> bool {
        self.current_state.name() == state && self.read_symbol == symbol
    }

    /// The two states a rule mentions, source first.
    pub fn states(&self) -> [&State; 2] {
        [&self.current_state, &self.next_state]
    }
}

/// The halting and boundary policy the engine runs under.
///
/// - `Unbounded` (default): halts when an accepting state is entered, or silently when no
///   rule applies. The tape grows by one blank on every right overrun and the head is
///   clamped at cell 0 on the left.
/// - `Bounded`: the tape is padded with one sentinel blank at each end and never grows;
///   the machine halts on the explicit accept or reject state, and a missing rule forces
///   the reject state.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    #[default]
    Unbounded,
    Bounded(Bounds),
}

/// Declared states, alphabet and halting identifiers of a bounded machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub states: Vec<String>,
    pub alphabet: Vec<char>,
    pub start: String,
    pub accept: String,
    pub reject: String,
}

/// A complete machine definition: the rule table, the initial tape and the execution
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Human readable name used in reports.
    pub name: String,
    /// Halting and boundary policy.
    pub profile: Profile,
    /// Rules in match order. The first applicable rule wins.
    pub rules: Vec<Rule>,
    /// Initial tape content.
    pub tape: Tape,
    /// Initial head position.
    pub head: usize,
    /// Symbol used to extend and pad the tape.
    pub blank: char,
    /// Optional cap on executed transitions. `None` runs until the machine halts.
    pub max_steps: Option<usize>,
}

impl Program {
    /// Creates an unbounded program from rules, an initial tape and a head position.
    pub fn new(rules: Vec<Rule>, tape: Tape, head: usize) -> Self {
        Self {
            name: String::from("unnamed"),
            profile: Profile::Unbounded,
            rules,
            tape,
            head,
            blank: BLANK_SYMBOL,
            max_steps: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_blank(mut self, blank: char) -> Self {
        self.blank = blank;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Replaces the initial tape with `input`.
    ///
    /// Bounded programs get their sentinel cells back around the new input.
    pub fn with_input(mut self, input: &str) -> Self {
        self.tape = match self.profile {
            Profile::Unbounded => Tape::from(input),
            Profile::Bounded(_) => Tape::padded(input, self.blank),
        };
        self
    }

    /// Returns every state mentioned by the rules, deduplicated by name, in order of
    /// first appearance.
    pub fn states(&self) -> Vec<&State> {
        let mut states: Vec<&State> = Vec::new();
        for state in self.rules.iter().flat_map(Rule::states) {
            if !states.iter().any(|s| s.name() == state.name()) {
                states.push(state);
            }
        }
        states
    }

    /// Returns the initial tape content as shown to a user, without bounded sentinels.
    pub fn initial_tape(&self) -> String {
        match self.profile {
            Profile::Unbounded => self.tape.to_string(),
            Profile::Bounded(_) => self.tape.interior(),
        }
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine applied a transition and continues execution.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

/// How a machine halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    /// An accepting state was reached.
    Accept,
    /// No rule applied, or the explicit reject state was reached.
    Reject,
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::Accept => f.write_str("accept"),
            Halt::Reject => f.write_str("reject"),
        }
    }
}

/// The externally observable result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub halt: Halt,
    /// Name of the state the machine halted in.
    pub state: String,
    /// Final tape content (bounded sentinels excluded).
    pub tape: String,
    /// Number of transitions applied.
    pub steps: usize,
}

/// Represents the errors that can occur while building or running a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// No state flagged as start exists among the rules.
    #[error("No start state defined")]
    NoStartState,
    /// More than one distinct state is flagged as start.
    #[error("Multiple start states defined: {0:?}")]
    MultipleStartStates(Vec<String>),
    /// A tape access fell outside the current tape.
    #[error("Tape index {index} out of range for tape of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    /// The configured step cap was reached before the machine halted.
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(usize),
    /// Indicates an error during the validation of a program's structure or logic.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// A lookup in the built-in program registry failed.
    #[error("Unknown program: {0}")]
    UnknownProgram(String),
}
