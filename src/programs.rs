//! Built-in demonstration machines and lookups over them.

use crate::builder::BoundedBuilder;
use crate::tape::Tape;
use crate::types::{Direction, MachineError, Profile, Program, Rule, State};

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = vec![
        flip_two(),
        flip_two_bounded(),
        invert(),
        rewind(),
        even_ones(),
    ];
}

/// Rewrites the first two symbols (`0 <-> 1`) and accepts.
fn flip_two() -> Program {
    let q0 = State::start("q0");
    let q1 = State::new("q1");
    let q2 = State::accepting("q2");

    let rules = vec![
        Rule::new(&q0, '0', &q1, '1', Direction::Right),
        Rule::new(&q0, '1', &q1, '0', Direction::Right),
        Rule::new(&q1, '0', &q2, '1', Direction::Right),
        Rule::new(&q1, '1', &q2, '0', Direction::Right),
    ];

    Program::new(rules, Tape::from("1001000"), 0).with_name("flip-two")
}

/// The same rewrite on a padded tape with explicit accept/reject states. Nothing leaves
/// `q2`, so the machine is forced into `q_reject`.
fn flip_two_bounded() -> Program {
    BoundedBuilder::new("q0", "q_accept", "q_reject")
        .name("flip-two-bounded")
        .states(["q0", "q1", "q2", "q_accept", "q_reject"])
        .alphabet(['0', '1'])
        .rule("q0", '0', "q1", '1', Direction::Right)
        .rule("q0", '1', "q1", '0', Direction::Right)
        .rule("q1", '0', "q2", '1', Direction::Right)
        .rule("q1", '1', "q2", '0', Direction::Right)
        .build("1001000")
}

/// Inverts every bit, then accepts on the first blank past the input.
fn invert() -> Program {
    let scan = State::start("scan");
    let done = State::accepting("done");

    let rules = vec![
        Rule::new(&scan, '0', &scan, '1', Direction::Right),
        Rule::new(&scan, '1', &scan, '0', Direction::Right),
        Rule::new(&scan, '_', &done, '_', Direction::Right),
    ];

    Program::new(rules, Tape::from("1011"), 0).with_name("invert")
}

/// Marks cells while walking left past the start of the tape, then accepts.
fn rewind() -> Program {
    let back = State::start("back");
    let done = State::accepting("done");

    let rules = vec![
        Rule::new(&back, '1', &back, 'x', Direction::Left),
        Rule::new(&back, 'x', &done, 'y', Direction::Right),
    ];

    Program::new(rules, Tape::from("111"), 2).with_name("rewind")
}

/// Accepts inputs with an even number of `1`s and rejects the rest.
fn even_ones() -> Program {
    BoundedBuilder::new("even", "accept", "reject")
        .name("even-ones")
        .states(["even", "odd", "accept", "reject"])
        .alphabet(['0', '1'])
        .rule("even", '0', "even", '0', Direction::Right)
        .rule("even", '1', "odd", '1', Direction::Right)
        .rule("odd", '0', "odd", '0', Direction::Right)
        .rule("odd", '1', "even", '1', Direction::Right)
        .rule("even", '_', "accept", '_', Direction::Right)
        .build("1001")
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, MachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            MachineError::UnknownProgram(format!("index {} out of range", index))
        })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, MachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| MachineError::UnknownProgram(name.to_string()))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, MachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            bounded: matches!(program.profile, Profile::Bounded(_)),
            initial_tape: program.initial_tape(),
            state_count: program.states().len(),
            rule_count: program.rules.len(),
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| program.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub bounded: bool,
    pub initial_tape: String,
    pub state_count: usize,
    pub rule_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::TuringMachine;
    use crate::types::Halt;

    fn run(name: &str) -> crate::types::Outcome {
        let program = ProgramManager::get_program_by_name(name).unwrap();
        TuringMachine::new(program).unwrap().run().unwrap()
    }

    #[test]
    fn test_all_programs_are_valid() {
        for i in 0..ProgramManager::get_program_count() {
            let program = ProgramManager::get_program_by_index(i).unwrap();
            let name = program.name.clone();
            assert!(
                TuringMachine::new(program).is_ok(),
                "Program '{}' is invalid",
                name
            );
        }
    }

    #[test]
    fn test_program_names() {
        let names = ProgramManager::list_program_names();
        assert_eq!(
            names,
            vec!["flip-two", "flip-two-bounded", "invert", "rewind", "even-ones"]
        );
    }

    #[test]
    fn test_flip_two() {
        let outcome = run("flip-two");
        assert_eq!(outcome.halt, Halt::Accept);
        assert_eq!(outcome.tape, "0101000");
        assert_eq!(outcome.state, "q2");
    }

    #[test]
    fn test_flip_two_bounded() {
        let outcome = run("flip-two-bounded");
        assert_eq!(outcome.halt, Halt::Reject);
        assert_eq!(outcome.tape, "0101000");
        assert_eq!(outcome.state, "q_reject");
    }

    #[test]
    fn test_invert_extends_tape() {
        let outcome = run("invert");
        assert_eq!(outcome.halt, Halt::Accept);
        assert_eq!(outcome.tape, "0100__");
        assert_eq!(outcome.steps, 5);
    }

    #[test]
    fn test_rewind_clamps_head() {
        let outcome = run("rewind");
        assert_eq!(outcome.halt, Halt::Accept);
        assert_eq!(outcome.tape, "yxx");
        assert_eq!(outcome.steps, 4);
    }

    #[test]
    fn test_even_ones() {
        let outcome = run("even-ones");
        assert_eq!(outcome.halt, Halt::Accept);
        assert_eq!(outcome.state, "accept");
        assert_eq!(outcome.tape, "1001");

        let program = ProgramManager::get_program_by_name("even-ones")
            .unwrap()
            .with_input("1101");
        let (tape, state) = TuringMachine::new(program).unwrap().execute().unwrap();
        assert_eq!(state, "reject");
        assert_eq!(tape, "1101");
    }

    #[test]
    fn test_get_program_by_index() {
        assert!(ProgramManager::get_program_by_index(0).is_ok());
        assert!(matches!(
            ProgramManager::get_program_by_index(999),
            Err(MachineError::UnknownProgram(_))
        ));
    }

    #[test]
    fn test_get_program_by_name() {
        let program = ProgramManager::get_program_by_name("flip-two").unwrap();
        assert_eq!(program.initial_tape(), "1001000");

        assert_eq!(
            ProgramManager::get_program_by_name("nonexistent"),
            Err(MachineError::UnknownProgram("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_get_program_info() {
        let info = ProgramManager::get_program_info(1).unwrap();
        assert_eq!(info.index, 1);
        assert_eq!(info.name, "flip-two-bounded");
        assert!(info.bounded);
        assert_eq!(info.initial_tape, "1001000");
        assert_eq!(info.state_count, 3);
        assert_eq!(info.rule_count, 4);

        assert!(ProgramManager::get_program_info(999).is_err());
    }

    #[test]
    fn test_search_programs() {
        assert_eq!(ProgramManager::search_programs("FLIP"), vec![0, 1]);
        assert_eq!(ProgramManager::search_programs("ones"), vec![4]);
        assert!(ProgramManager::search_programs("nonexistent").is_empty());
    }
}
