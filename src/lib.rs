//! This crate provides the core logic for a single-tape Turing Machine simulator.
//! It includes modules for parsing machine definitions, running them to completion,
//! analyzing programs for likely mistakes, and a small catalog of built-in programs.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisWarning` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisWarning};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct and the `run` entry point from the machine module.
pub use machine::{run, TuringMachine};
/// Re-exports the parsing functions from the parser module.
pub use parser::{parse, parse_with_tape};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports various types related to Turing Machine definition and execution from the types module.
pub use types::{
    Definition, Direction, Program, State, Step, Symbol, Transition, TransitionRule,
    TuringMachineError, MAX_PROGRAM_SIZE,
};
