//! This crate provides the core logic for a deterministic single-tape Turing machine
//! interpreter. It includes the state, tape and rule model, the execution engine with its
//! unbounded and bounded profiles, up-front program analysis, and a set of built-in programs.

pub mod analyzer;
pub mod builder;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the bounded program builder.
pub use builder::BoundedBuilder;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the machine model and execution types from the types module.
pub use types::{
    Bounds, Direction, Halt, MachineError, Outcome, Profile, Program, Rule, State, Step,
    BLANK_SYMBOL,
};
