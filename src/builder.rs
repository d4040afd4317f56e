//! Fluent construction of bounded (two-sentinel) programs from plain identifiers.
//!
//! The unbounded variant is built directly from [`State`] and [`Rule`] values with
//! [`Program::new`]. The bounded variant is described the other way around: a list of
//! state names, an alphabet, name-based rules and the start, accept and reject
//! identifiers. [`BoundedBuilder::build`] turns that description into a [`Program`]
//! running under [`Profile::Bounded`].

use crate::tape::Tape;
use crate::types::{Bounds, Direction, Profile, Program, Rule, State, BLANK_SYMBOL};

#[derive(Debug, Clone)]
struct NamedRule {
    from: String,
    read: char,
    to: String,
    write: char,
    direction: Direction,
}

/// Builder for bounded programs.
#[derive(Debug, Clone)]
pub struct BoundedBuilder {
    name: String,
    states: Vec<String>,
    alphabet: Vec<char>,
    rules: Vec<NamedRule>,
    start: String,
    accept: String,
    reject: String,
    blank: char,
    max_steps: Option<usize>,
}

impl BoundedBuilder {
    /// Creates a builder with the three identifiers every bounded machine needs.
    pub fn new(
        start: impl Into<String>,
        accept: impl Into<String>,
        reject: impl Into<String>,
    ) -> Self {
        Self {
            name: String::from("unnamed"),
            states: Vec::new(),
            alphabet: Vec::new(),
            rules: Vec::new(),
            start: start.into(),
            accept: accept.into(),
            reject: reject.into(),
            blank: BLANK_SYMBOL,
            max_steps: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declares the machine's states.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Declares the input alphabet. The blank symbol is always allowed.
    pub fn alphabet<I>(mut self, alphabet: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.alphabet.extend(alphabet);
        self
    }

    /// Adds a rule `(from, read) -> (to, write, direction)`.
    pub fn rule(
        mut self,
        from: impl Into<String>,
        read: char,
        to: impl Into<String>,
        write: char,
        direction: Direction,
    ) -> Self {
        self.rules.push(NamedRule {
            from: from.into(),
            read,
            to: to.into(),
            write,
            direction,
        });
        self
    }

    pub fn blank(mut self, blank: char) -> Self {
        self.blank = blank;
        self
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Builds the program for `input`.
    ///
    /// Nothing is validated here: undeclared states, symbols outside the alphabet and
    /// the like are reported when the machine is constructed.
    pub fn build(self, input: &str) -> Program {
        let rules = self
            .rules
            .iter()
            .map(|rule| Rule {
                current_state: self.state(&rule.from),
                read_symbol: rule.read,
                next_state: self.state(&rule.to),
                write_symbol: rule.write,
                direction: rule.direction,
            })
            .collect();

        Program {
            name: self.name,
            profile: Profile::Bounded(Bounds {
                states: self.states,
                alphabet: self.alphabet,
                start: self.start,
                accept: self.accept,
                reject: self.reject,
            }),
            rules,
            tape: Tape::padded(input, self.blank),
            head: 1,
            blank: self.blank,
            max_steps: self.max_steps,
        }
    }

    fn state(&self, name: &str) -> State {
        State::new(name)
            .with_start(name == self.start)
            .with_accepting(name == self.accept)
    }
}
