//! End-to-end runs of the two execution profiles through the public API.

use tmsim::{
    BoundedBuilder, Direction, Halt, MachineError, Program, Rule, State, Tape, TuringMachine,
};

fn flip_two_rules() -> Vec<Rule> {
    let states = [State::start("q0"), State::new("q1"), State::accepting("q2")];

    vec![
        Rule::new(&states[0], '0', &states[1], '1', Direction::Right),
        Rule::new(&states[0], '1', &states[1], '0', Direction::Right),
        Rule::new(&states[1], '0', &states[2], '1', Direction::Right),
        Rule::new(&states[1], '1', &states[2], '0', Direction::Right),
    ]
}

#[test]
fn unbounded_flip_two_rewrites_first_two_cells() {
    let tape = Tape::new(vec!['1', '0', '0', '1', '0', '0', '0']);
    let program = Program::new(flip_two_rules(), tape, 0);
    let mut machine = TuringMachine::new(program).unwrap();

    let outcome = machine.run().unwrap();

    assert_eq!(outcome.tape, "0101000");
    assert_eq!(outcome.state, "q2");
    assert_eq!(outcome.halt, Halt::Accept);
    assert_eq!(outcome.steps, 2);
}

#[test]
fn bounded_flip_two_falls_into_reject() {
    let program = BoundedBuilder::new("q0", "q_accept", "q_reject")
        .states(["q0", "q1", "q2", "q_accept", "q_reject"])
        .alphabet(['0', '1'])
        .rule("q0", '0', "q1", '1', Direction::Right)
        .rule("q0", '1', "q1", '0', Direction::Right)
        .rule("q1", '0', "q2", '1', Direction::Right)
        .rule("q1", '1', "q2", '0', Direction::Right)
        .build("1001000");
    let mut machine = TuringMachine::new(program).unwrap();

    let (tape, state) = machine.execute().unwrap();

    assert_eq!(state, "q_reject");
    assert_eq!(tape, "0101000");
    assert_ne!(tape, "1001000");
}

#[test]
fn independent_machines_do_not_share_state() {
    let program = Program::new(flip_two_rules(), Tape::from("1001000"), 0);

    let mut first = TuringMachine::new(program.clone()).unwrap();
    let mut second = TuringMachine::new(program.clone()).unwrap();

    assert_eq!(first.run().unwrap(), second.run().unwrap());
    assert_eq!(program.tape.to_string(), "1001000");
}

#[test]
fn missing_start_state_fails_before_running() {
    let q0 = State::new("q0");
    let q1 = State::accepting("q1");
    let program = Program::new(
        vec![Rule::new(&q0, '1', &q1, '0', Direction::Right)],
        Tape::from("1"),
        0,
    );

    assert_eq!(
        TuringMachine::new(program).unwrap_err(),
        MachineError::NoStartState
    );
}

#[test]
fn duplicate_rules_are_rejected_up_front() {
    let mut rules = flip_two_rules();
    let q0 = State::start("q0");
    let q2 = State::accepting("q2");
    rules.push(Rule::new(&q0, '1', &q2, '1', Direction::Left));

    let result = TuringMachine::new(Program::new(rules, Tape::from("1"), 0));
    assert!(matches!(result, Err(MachineError::ValidationError(_))));
}

#[test]
fn custom_blank_is_used_for_extension() {
    let scan = State::start("scan");
    let done = State::accepting("done");
    let rules = vec![
        Rule::new(&scan, 'a', &scan, 'a', Direction::Right),
        Rule::new(&scan, '#', &done, '#', Direction::Right),
    ];
    let program = Program::new(rules, Tape::from("aa"), 0).with_blank('#');

    let mut machine = TuringMachine::new(program).unwrap();
    assert_eq!(machine.simulate().unwrap(), "aa##");
}
