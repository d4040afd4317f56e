//! This module provides functions for analyzing programs to detect common errors and
//! inconsistencies before execution. This includes checks for valid head positions, a unique
//! start state, consistent state flags, deterministic rule tables, and (for bounded programs)
//! declared states and alphabet membership.

use crate::types::{Bounds, MachineError, Profile, Program};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Represents various errors that can be found during the analysis of a program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The head does not point into the initial tape.
    InvalidHead(usize),
    /// No state is flagged as start.
    NoStartState,
    /// More than one distinct state is flagged as start.
    MultipleStartStates(Vec<String>),
    /// The same state name is used with different start/accepting flags.
    ConflictingStates(Vec<String>),
    /// More than one rule exists for the same `(state, symbol)` pair.
    NondeterministicRules(Vec<String>),
    /// Rules or halting identifiers reference states that were never declared.
    UndefinedStates(Vec<String>),
    /// The tape or the rules use symbols outside the declared alphabet.
    InvalidTapeSymbols(Vec<char>),
    /// Indicates structural problems with the program (empty tape, etc.).
    StructuralError(String),
}

impl From<AnalysisError> for MachineError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::NoStartState => MachineError::NoStartState,
            AnalysisError::MultipleStartStates(states) => MachineError::MultipleStartStates(states),
            AnalysisError::InvalidHead(pos) => {
                MachineError::ValidationError(format!("Invalid head position: {}", pos))
            }
            AnalysisError::ConflictingStates(states) => MachineError::ValidationError(format!(
                "States declared with conflicting flags: {:?}",
                states
            )),
            AnalysisError::NondeterministicRules(pairs) => MachineError::ValidationError(
                format!("Multiple rules for the same state and symbol: {:?}", pairs),
            ),
            AnalysisError::UndefinedStates(states) => MachineError::ValidationError(format!(
                "Rules reference undeclared states: {:?}",
                states
            )),
            AnalysisError::InvalidTapeSymbols(symbols) => MachineError::ValidationError(format!(
                "Symbols outside the alphabet: {:?}",
                symbols
            )),
            AnalysisError::StructuralError(msg) => MachineError::ValidationError(msg),
        }
    }
}

/// Analyzes a `Program` for structural and logical errors.
///
/// Runs every check and reports the first failure. Unreachable states are not an error
/// and are only logged.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(MachineError)` describing the first violated rule.
pub fn analyze(program: &Program) -> Result<(), MachineError> {
    let errors = [
        check_structure,
        check_head,
        check_state_flags,
        check_start_state,
        check_determinism,
        check_declared_states,
        check_alphabet,
    ]
    .iter()
    .filter_map(|f| f(program).err())
    .collect::<Vec<_>>();

    if let Some(first_error) = errors.into_iter().next() {
        return Err(first_error.into());
    }

    let unreachable = unreachable_states(program);
    if !unreachable.is_empty() {
        warn!(program = %program.name, states = ?unreachable, "unreachable states");
    }

    Ok(())
}

/// Returns the name of the start state.
///
/// Unbounded programs derive it from the rules' start flags; bounded programs name it
/// explicitly.
pub fn start_state(program: &Program) -> Result<String, AnalysisError> {
    match &program.profile {
        Profile::Unbounded => {
            let starts = start_flagged(program);
            match starts.as_slice() {
                [] => Err(AnalysisError::NoStartState),
                [start] => Ok(start.clone()),
                _ => Err(AnalysisError::MultipleStartStates(starts)),
            }
        }
        Profile::Bounded(bounds) => {
            if bounds.states.contains(&bounds.start) {
                Ok(bounds.start.clone())
            } else {
                Err(AnalysisError::NoStartState)
            }
        }
    }
}

fn start_flagged(program: &Program) -> Vec<String> {
    program
        .states()
        .into_iter()
        .filter(|state| state.is_start())
        .map(|state| state.name().to_string())
        .collect()
}

fn check_structure(program: &Program) -> Result<(), AnalysisError> {
    if program.tape.is_empty() {
        return Err(AnalysisError::StructuralError("Tape is empty".to_string()));
    }

    if let Profile::Bounded(bounds) = &program.profile {
        if bounds.accept == bounds.reject {
            return Err(AnalysisError::StructuralError(format!(
                "Accept and reject states must differ, both are '{}'",
                bounds.accept
            )));
        }
    }

    Ok(())
}

/// Checks that the initial head position points into the initial tape.
fn check_head(program: &Program) -> Result<(), AnalysisError> {
    if program.head >= program.tape.len() && !program.tape.is_empty() {
        return Err(AnalysisError::InvalidHead(program.head));
    }

    Ok(())
}

/// Checks that every reference to a state name carries the same flags.
fn check_state_flags(program: &Program) -> Result<(), AnalysisError> {
    let mut flags: HashMap<&str, (bool, bool)> = HashMap::new();
    let mut conflicting = HashSet::new();

    for state in program.rules.iter().flat_map(|rule| rule.states()) {
        let current = (state.is_start(), state.is_accepting());
        let seen = flags.entry(state.name()).or_insert(current);
        if *seen != current {
            conflicting.insert(state.name().to_string());
        }
    }

    if !conflicting.is_empty() {
        let mut conflicting: Vec<String> = conflicting.into_iter().collect();
        conflicting.sort();
        return Err(AnalysisError::ConflictingStates(conflicting));
    }

    Ok(())
}

/// Checks that exactly one start state exists.
fn check_start_state(program: &Program) -> Result<(), AnalysisError> {
    start_state(program)?;

    if let Profile::Bounded(bounds) = &program.profile {
        let stray: Vec<String> = start_flagged(program)
            .into_iter()
            .filter(|name| *name != bounds.start)
            .collect();
        if !stray.is_empty() {
            return Err(AnalysisError::MultipleStartStates(stray));
        }
    }

    Ok(())
}

/// Checks that at most one rule exists per `(state, symbol)` pair.
fn check_determinism(program: &Program) -> Result<(), AnalysisError> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for rule in &program.rules {
        let key = (rule.current_state.name(), rule.read_symbol);
        if !seen.insert(key) {
            duplicates.push(format!("{} on '{}'", key.0, key.1));
        }
    }

    if !duplicates.is_empty() {
        duplicates.dedup();
        return Err(AnalysisError::NondeterministicRules(duplicates));
    }

    Ok(())
}

/// Checks that bounded programs only reference declared states.
fn check_declared_states(program: &Program) -> Result<(), AnalysisError> {
    let Profile::Bounded(bounds) = &program.profile else {
        return Ok(());
    };

    let declared: HashSet<&str> = bounds.states.iter().map(String::as_str).collect();
    let referenced = program
        .rules
        .iter()
        .flat_map(|rule| rule.states())
        .map(|state| state.name())
        .chain([bounds.accept.as_str(), bounds.reject.as_str()]);

    let mut undefined: Vec<String> = referenced
        .filter(|name| !declared.contains(name))
        .map(str::to_string)
        .collect();

    if !undefined.is_empty() {
        undefined.sort();
        undefined.dedup();
        return Err(AnalysisError::UndefinedStates(undefined));
    }

    Ok(())
}

/// Checks that bounded programs only use symbols from the declared alphabet.
fn check_alphabet(program: &Program) -> Result<(), AnalysisError> {
    let Profile::Bounded(bounds) = &program.profile else {
        return Ok(());
    };

    let allowed = allowed_symbols(bounds, program.blank);
    let used = program.tape.symbols().iter().copied().chain(
        program
            .rules
            .iter()
            .flat_map(|rule| [rule.read_symbol, rule.write_symbol]),
    );

    let mut invalid: Vec<char> = used.filter(|c| !allowed.contains(c)).collect();

    if !invalid.is_empty() {
        invalid.sort();
        invalid.dedup();
        return Err(AnalysisError::InvalidTapeSymbols(invalid));
    }

    Ok(())
}

fn allowed_symbols(bounds: &Bounds, blank: char) -> HashSet<char> {
    bounds
        .alphabet
        .iter()
        .copied()
        .chain(std::iter::once(blank))
        .collect()
}

/// Returns the states mentioned by the rules that cannot be reached from the start state,
/// sorted by name.
pub fn unreachable_states(program: &Program) -> Vec<String> {
    let Ok(start) = start_state(program) else {
        return Vec::new();
    };

    let mut visited = HashSet::new();
    let mut queue = vec![start];

    while let Some(state) = queue.pop() {
        if !visited.insert(state.clone()) {
            continue;
        }

        for rule in program.rules.iter().filter(|r| r.current_state.name() == state) {
            if !visited.contains(rule.next_state.name()) {
                queue.push(rule.next_state.name().to_string());
            }
        }
    }

    let mut unreachable: Vec<String> = program
        .states()
        .into_iter()
        .map(|state| state.name().to_string())
        .filter(|name| !visited.contains(name))
        .collect();
    unreachable.sort();
    unreachable
}
