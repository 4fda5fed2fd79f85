//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including the program representation, transitions, step outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::machine::TuringMachine;
use crate::Rule;

/// A symbol written on the tape. Symbols are opaque tokens compared by equality only.
pub type Symbol = String;
/// A machine state label. States are opaque tokens compared by equality only.
pub type State = String;

/// The maximum allowed size for a Turing Machine definition in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB

/// Represents the possible directions the tape head can move.
///
/// There is no "stay" move: every transition shifts the head by exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl FromStr for Direction {
    type Err = TuringMachineError;

    /// Accepts `l`, `left` or `<` for Left and `r`, `right` or `>` for Right, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "left" | "<" => Ok(Direction::Left),
            "r" | "right" | ">" => Ok(Direction::Right),
            _ => Err(TuringMachineError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "l"),
            Direction::Right => write!(f, "r"),
        }
    }
}

/// The action taken when a `(state, symbol)` pair matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The next state the machine transitions to.
    pub next_state: State,
    /// The symbol written under the head.
    pub write: Symbol,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

/// A single line of a transition table: `state read next_state write direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    pub state: State,
    pub read: Symbol,
    pub next_state: State,
    pub write: Symbol,
    pub direction: Direction,
}

impl TransitionRule {
    pub fn new(
        state: impl Into<State>,
        read: impl Into<Symbol>,
        next_state: impl Into<State>,
        write: impl Into<Symbol>,
        direction: Direction,
    ) -> Self {
        Self {
            state: state.into(),
            read: read.into(),
            next_state: next_state.into(),
            write: write.into(),
            direction,
        }
    }
}

/// An immutable single-tape Turing Machine program.
///
/// A program holds the blank symbol, the initial and final states, and a transition table
/// keyed by `(state, symbol)`. Every key is unique; it is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ProgramDef", try_from = "ProgramDef")]
pub struct Program {
    blank: Symbol,
    initial_state: State,
    final_state: State,
    transitions: HashMap<State, HashMap<Symbol, Transition>>,
}

impl Program {
    /// Builds a program from its transition rules.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if every `(state, read)` pair appears at most once.
    /// * `Err(TuringMachineError::DuplicateTransition)` on the first repeated pair.
    pub fn new(
        blank: impl Into<Symbol>,
        initial_state: impl Into<State>,
        final_state: impl Into<State>,
        rules: impl IntoIterator<Item = TransitionRule>,
    ) -> Result<Self, TuringMachineError> {
        let mut transitions: HashMap<State, HashMap<Symbol, Transition>> = HashMap::new();

        for rule in rules {
            let by_symbol = transitions.entry(rule.state.clone()).or_default();
            if by_symbol.contains_key(&rule.read) {
                return Err(TuringMachineError::DuplicateTransition {
                    state: rule.state,
                    symbol: rule.read,
                });
            }

            by_symbol.insert(
                rule.read,
                Transition {
                    next_state: rule.next_state,
                    write: rule.write,
                    direction: rule.direction,
                },
            );
        }

        Ok(Self {
            blank: blank.into(),
            initial_state: initial_state.into(),
            final_state: final_state.into(),
            transitions,
        })
    }

    /// Finds the transition for the given state and symbol, if one is defined.
    pub fn lookup(&self, state: &str, symbol: &str) -> Option<&Transition> {
        self.transitions.get(state)?.get(symbol)
    }

    pub fn blank(&self) -> &str {
        &self.blank
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn final_state(&self) -> &str {
        &self.final_state
    }

    /// Returns the number of transitions in the table.
    pub fn len(&self) -> usize {
        self.transitions.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the transitions defined for `state`, keyed by the symbol they read.
    pub fn transitions_from(&self, state: &str) -> Option<&HashMap<Symbol, Transition>> {
        self.transitions.get(state).filter(|t| !t.is_empty())
    }

    /// Returns every transition rule, sorted by `(state, read)`.
    pub fn rules(&self) -> Vec<TransitionRule> {
        let mut rules: Vec<TransitionRule> = self
            .transitions
            .iter()
            .flat_map(|(state, by_symbol)| {
                by_symbol.iter().map(move |(read, t)| TransitionRule {
                    state: state.clone(),
                    read: read.clone(),
                    next_state: t.next_state.clone(),
                    write: t.write.clone(),
                    direction: t.direction,
                })
            })
            .collect();

        rules.sort_by(|a, b| (&a.state, &a.read).cmp(&(&b.state, &b.read)));
        rules
    }

    /// Returns every state mentioned by the program, including initial and final states.
    pub fn states(&self) -> BTreeSet<&str> {
        let mut states = BTreeSet::from([self.initial_state.as_str(), self.final_state.as_str()]);

        for (state, by_symbol) in &self.transitions {
            states.insert(state.as_str());
            states.extend(by_symbol.values().map(|t| t.next_state.as_str()));
        }

        states
    }
}

/// Serialized form of a [`Program`]; deserialization goes back through [`Program::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProgramDef {
    blank: Symbol,
    initial_state: State,
    final_state: State,
    rules: Vec<TransitionRule>,
}

impl From<Program> for ProgramDef {
    fn from(program: Program) -> Self {
        let rules = program.rules();
        Self {
            blank: program.blank,
            initial_state: program.initial_state,
            final_state: program.final_state,
            rules,
        }
    }
}

impl TryFrom<ProgramDef> for Program {
    type Error = TuringMachineError;

    fn try_from(def: ProgramDef) -> Result<Self, Self::Error> {
        Program::new(def.blank, def.initial_state, def.final_state, def.rules)
    }
}

/// A parsed machine definition: the program plus the initial head position and tape.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub program: Program,
    pub head: i64,
    pub tape: Vec<Symbol>,
}

impl Definition {
    /// Creates a machine positioned at the definition's initial head and tape.
    pub fn machine(&self) -> Result<TuringMachine<'_>, TuringMachineError> {
        TuringMachine::new(&self.program, self.head, self.tape.clone())
    }

    /// Runs the definition to completion and returns the final tape.
    pub fn run(&self) -> Result<Vec<Symbol>, TuringMachineError> {
        self.machine()?.run()
    }
}

/// Represents the outcome of a Turing Machine execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine applied a transition and continues execution.
    Continue,
    /// The machine is in its final state.
    Halt,
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// Indicates that there's no rule defined for the current state and symbol.
    #[error("No rule defined for state {state} and symbol {symbol:?}")]
    UndefinedTransition { state: State, symbol: Symbol },
    /// Indicates that two rules share the same state and read symbol.
    #[error("Duplicate transition rule for state {state} and symbol {symbol:?}")]
    DuplicateTransition { state: State, symbol: Symbol },
    /// Indicates a move that is neither left nor right.
    #[error("Invalid direction: {0:?} (expected l or r)")]
    InvalidDirection(String),
    /// Indicates an initial head position more than one cell outside the tape.
    #[error("Invalid head position {head} for a tape of length {len}")]
    InvalidHead { head: i64, len: usize },
    /// Indicates that the opt-in step limit was reached before the final state.
    #[error("Step limit of {0} exceeded before reaching the final state")]
    StepLimitExceeded(usize),
    /// Indicates an error during the parsing of a Turing Machine definition.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates an error during the validation of a Turing Machine definition.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to reading a definition from a file or stream.
    #[error("File error: {0}")]
    FileError(String),
}
