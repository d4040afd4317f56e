//! Property-based tests for the unbounded execution profile.
//!
//! Random deterministic rule tables over four states and three symbols are run with a step
//! cap, checking the tape boundary invariants after every transition.

use proptest::prelude::*;
use tmsim::{Direction, Halt, Program, Rule, State, Step, Tape, TuringMachine};

const SYMBOLS: [char; 3] = ['0', '1', '_'];
const STATE_COUNT: usize = 4;
const MAX_STEPS: usize = 200;

type Entry = Option<(usize, usize, bool)>;

fn state(index: usize) -> State {
    let name = format!("q{}", index);
    match index {
        0 => State::start(name),
        i if i == STATE_COUNT - 1 => State::accepting(name),
        _ => State::new(name),
    }
}

/// One optional rule per `(state, symbol)` pair keeps every table deterministic.
fn rules_from(table: &[Entry]) -> Vec<Rule> {
    table
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            entry.map(|(next, write, right)| {
                Rule::new(
                    &state(i / SYMBOLS.len()),
                    SYMBOLS[i % SYMBOLS.len()],
                    &state(next),
                    SYMBOLS[write],
                    if right {
                        Direction::Right
                    } else {
                        Direction::Left
                    },
                )
            })
        })
        .collect()
}

prop_compose! {
    fn arbitrary_program()(
        table in proptest::collection::vec(
            proptest::option::of((0..STATE_COUNT, 0..SYMBOLS.len(), any::<bool>())),
            STATE_COUNT * SYMBOLS.len(),
        ),
        tape in "[01]{1,8}",
        head_seed in any::<usize>(),
    ) -> Program {
        let head = head_seed % tape.len();
        Program::new(rules_from(&table), Tape::from(tape.as_str()), head)
            .with_max_steps(MAX_STEPS)
    }
}

proptest! {
    #[test]
    fn construction_is_idempotent(program in arbitrary_program()) {
        let first = TuringMachine::new(program.clone()).and_then(|mut m| m.run());
        let second = TuringMachine::new(program).and_then(|mut m| m.run());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn head_stays_on_tape_and_tape_grows_by_one(program in arbitrary_program()) {
        let original_len = program.tape.len();
        let Ok(mut machine) = TuringMachine::new(program) else {
            return Ok(());
        };

        let mut extensions = 0;
        for _ in 0..MAX_STEPS {
            prop_assert!(machine.head() >= 0);
            prop_assert!((machine.head() as usize) < machine.tape().len());

            let before = machine.tape().len();
            match machine.step() {
                Ok(Step::Continue) => {
                    let after = machine.tape().len();
                    prop_assert!(after == before || after == before + 1);
                    extensions += after - before;
                    prop_assert_eq!(after, original_len + extensions);
                }
                Ok(Step::Halt(_)) => break,
                Err(e) => prop_assert!(false, "unbounded step failed: {}", e),
            }
        }
    }

    #[test]
    fn reject_leaves_tape_untouched(program in arbitrary_program()) {
        let Ok(mut machine) = TuringMachine::new(program) else {
            return Ok(());
        };

        for _ in 0..MAX_STEPS {
            let before = machine.tape().clone();
            let head = machine.head();
            match machine.step() {
                Ok(Step::Continue) => continue,
                Ok(Step::Halt(Halt::Reject)) => {
                    prop_assert_eq!(machine.tape(), &before);
                    prop_assert_eq!(machine.head(), head);
                    break;
                }
                Ok(Step::Halt(Halt::Accept)) => break,
                Err(e) => prop_assert!(false, "unbounded step failed: {}", e),
            }
        }
    }

    #[test]
    fn left_moves_at_origin_stay_at_origin(width in 1usize..6, moves in 1usize..10) {
        let walk = State::start("walk");
        let rules = vec![Rule::new(&walk, '0', &walk, '0', Direction::Left)];
        let program = Program::new(rules, Tape::from("0".repeat(width).as_str()), 0)
            .with_max_steps(moves);
        let mut machine = TuringMachine::new(program).unwrap();

        for _ in 0..moves {
            prop_assert_eq!(machine.step().unwrap(), Step::Continue);
            prop_assert_eq!(machine.head(), 0);
        }
        prop_assert_eq!(machine.tape().len(), width);
    }
}
