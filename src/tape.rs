//! The machine's linear read/write memory.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::MachineError;

/// An ordered, index-addressable sequence of symbols.
///
/// Every index in `[0, len)` holds a symbol. The tape only grows through
/// [`Tape::extend_right`]; there is no way to grow it on the left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape {
    symbols: Vec<char>,
}

impl Tape {
    pub fn new(symbols: Vec<char>) -> Self {
        Self { symbols }
    }

    /// Builds a tape with one `blank` sentinel on each side of `input`.
    pub fn padded(input: &str, blank: char) -> Self {
        let mut symbols = Vec::with_capacity(input.chars().count() + 2);
        symbols.push(blank);
        symbols.extend(input.chars());
        symbols.push(blank);
        Self { symbols }
    }

    /// Returns the symbol at `index`.
    pub fn read(&self, index: usize) -> Result<char, MachineError> {
        self.symbols
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Replaces the symbol at `index`.
    pub fn write(&mut self, index: usize, symbol: char) -> Result<(), MachineError> {
        if index >= self.symbols.len() {
            return Err(self.out_of_range(index));
        }

        self.symbols[index] = symbol;
        Ok(())
    }

    /// Appends one symbol to the right end.
    pub fn extend_right(&mut self, symbol: char) {
        self.symbols.push(symbol);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// The content between the two sentinel cells of a padded tape.
    pub fn interior(&self) -> String {
        match self.symbols.len() {
            0..=2 => String::new(),
            len => self.symbols[1..len - 1].iter().collect(),
        }
    }

    fn out_of_range(&self, index: usize) -> MachineError {
        MachineError::IndexOutOfRange {
            index: index as isize,
            len: self.symbols.len(),
        }
    }
}

impl From<&str> for Tape {
    fn from(input: &str) -> Self {
        Self::new(input.chars().collect())
    }
}

impl From<Vec<char>> for Tape {
    fn from(symbols: Vec<char>) -> Self {
        Self::new(symbols)
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{}", c))
    }
}
