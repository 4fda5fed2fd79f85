//! This module defines the `TuringMachine` struct, which simulates the behavior of a
//! single-tape Turing Machine. It owns the head position, current state and tape of one run
//! and applies the program's transitions until the final state is reached.

use crate::tape::Tape;
use crate::types::{Direction, Program, State, Step, Symbol, TuringMachineError};

/// Represents a single-tape Turing Machine executing a borrowed `Program`.
///
/// The head may sit one cell past either end of the materialized tape; the next step
/// grows the tape by one blank cell before reading.
#[derive(Debug, Clone)]
pub struct TuringMachine<'p> {
    program: &'p Program,
    state: State,
    head: i64,
    tape: Tape,
    step_count: usize,
}

impl<'p> TuringMachine<'p> {
    /// Creates a new `TuringMachine` from a program, a head position and an initial tape.
    ///
    /// # Arguments
    ///
    /// * `program` - The `Program` defining the Turing Machine.
    /// * `head` - The initial head position, in `-1..=tape.len()`.
    /// * `tape` - The initial tape content, left to right.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidHead)` if the head is further than one cell
    ///   outside the tape.
    pub fn new(
        program: &'p Program,
        head: i64,
        tape: Vec<Symbol>,
    ) -> Result<Self, TuringMachineError> {
        let len = tape.len();
        if head < -1 || head > len as i64 {
            return Err(TuringMachineError::InvalidHead { head, len });
        }

        Ok(Self {
            program,
            state: program.initial_state().to_string(),
            head,
            tape: Tape::new(tape, program.blank()),
            step_count: 0,
        })
    }

    /// Creates a machine over a single blank cell with the head on it.
    pub fn with_blank_tape(program: &'p Program) -> Self {
        Self {
            program,
            state: program.initial_state().to_string(),
            head: 0,
            tape: Tape::blank(program.blank()),
            step_count: 0,
        }
    }

    /// Executes a single step of the Turing Machine's computation.
    ///
    /// Grows the tape if the head sits just outside it, reads the symbol under the head,
    /// writes the transition's symbol, switches state and moves the head.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if a transition was applied.
    /// * `Ok(Step::Halt)` if the machine is already in its final state.
    /// * `Err(TuringMachineError::UndefinedTransition)` if no rule matches; the machine
    ///   is left as it was before the read.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        if self.is_halted() {
            return Ok(Step::Halt);
        }

        let index = self.materialize_head();

        let Some(symbol) = self.tape.read(index) else {
            return Err(TuringMachineError::InvalidHead {
                head: self.head,
                len: self.tape.len(),
            });
        };

        let transition = match self.program.lookup(&self.state, symbol) {
            Some(t) => t,
            None => {
                return Err(TuringMachineError::UndefinedTransition {
                    state: self.state.clone(),
                    symbol: symbol.clone(),
                })
            }
        };

        self.tape.write(index, transition.write.clone());
        self.state.clone_from(&transition.next_state);

        match transition.direction {
            Direction::Left => self.head -= 1,
            Direction::Right => self.head += 1,
        }

        self.step_count += 1;

        Ok(Step::Continue)
    }

    /// Runs the Turing Machine until it reaches the final state and returns the tape.
    ///
    /// A program that never reaches its final state keeps running; use
    /// [`TuringMachine::run_with_limit`] to bound execution.
    pub fn run(&mut self) -> Result<Vec<Symbol>, TuringMachineError> {
        while self.step()? == Step::Continue {}

        Ok(self.tape.symbols())
    }

    /// Runs the Turing Machine for at most `max_steps` transitions.
    ///
    /// # Returns
    ///
    /// * `Ok(tape)` if the final state was reached.
    /// * `Err(TuringMachineError::StepLimitExceeded)` if it was not reached in time.
    pub fn run_with_limit(&mut self, max_steps: usize) -> Result<Vec<Symbol>, TuringMachineError> {
        while !self.is_halted() {
            if self.step_count >= max_steps {
                return Err(TuringMachineError::StepLimitExceeded(max_steps));
            }
            self.step()?;
        }

        Ok(self.tape.symbols())
    }

    /// Grows the tape by one cell if the head sits just outside it and returns the
    /// head's index into the materialized tape.
    fn materialize_head(&mut self) -> usize {
        if self.head < 0 {
            self.tape.extend_left();
            self.head = 0;
        } else if self.head as usize == self.tape.len() {
            self.tape.extend_right();
        }

        self.head as usize
    }

    /// Returns the current state of the Turing Machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the head position. It is `-1` or `tape().len()` when the head has just
    /// stepped off the materialized tape.
    pub fn head(&self) -> i64 {
        self.head
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Returns the total number of transitions applied.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Checks if the Turing Machine has reached its final state.
    pub fn is_halted(&self) -> bool {
        self.state == self.program.final_state()
    }
}

/// Runs `program` from the given head position and tape until it halts.
///
/// Returns the final tape from left to right.
pub fn run(
    program: &Program,
    head: i64,
    tape: Vec<Symbol>,
) -> Result<Vec<Symbol>, TuringMachineError> {
    TuringMachine::new(program, head, tape)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransitionRule;

    fn symbols(cells: &[&str]) -> Vec<Symbol> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn unary_increment() -> Program {
        Program::new(
            "_",
            "s0",
            "halt",
            vec![
                TransitionRule::new("s0", "1", "s0", "1", Direction::Right),
                TransitionRule::new("s0", "_", "halt", "1", Direction::Right),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_machine_creation() {
        let program = unary_increment();
        let machine = TuringMachine::new(&program, 0, symbols(&["1", "_"])).unwrap();

        assert_eq!(machine.state(), "s0");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.tape().symbols(), vec!["1", "_"]);
        assert_eq!(machine.step_count(), 0);
        assert!(!machine.is_halted());
    }

    #[test]
    fn test_invalid_head() {
        let program = unary_increment();

        let error = TuringMachine::new(&program, 3, symbols(&["1", "_"])).unwrap_err();
        assert_eq!(error, TuringMachineError::InvalidHead { head: 3, len: 2 });

        let error = TuringMachine::new(&program, -2, symbols(&["1"])).unwrap_err();
        assert_eq!(error, TuringMachineError::InvalidHead { head: -2, len: 1 });

        assert!(TuringMachine::new(&program, -1, symbols(&["1"])).is_ok());
        assert!(TuringMachine::new(&program, 1, symbols(&["1"])).is_ok());
    }

    #[test]
    fn test_unary_increment() {
        let program = unary_increment();
        let tape = run(&program, 0, symbols(&["1", "1", "_"])).unwrap();

        // The machine halts right after writing; the cell past the head is never read.
        assert_eq!(tape, vec!["1", "1", "1"]);
    }

    #[test]
    fn test_binary_flip() {
        let program = Program::new(
            "0",
            "s0",
            "halt",
            vec![TransitionRule::new("s0", "0", "halt", "1", Direction::Right)],
        )
        .unwrap();

        let mut machine = TuringMachine::with_blank_tape(&program);
        assert_eq!(machine.run().unwrap(), vec!["1"]);
        assert_eq!(machine.head(), 1);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_single_step() {
        let program = unary_increment();
        let mut machine = TuringMachine::new(&program, 0, symbols(&["1"])).unwrap();

        assert_eq!(machine.step().unwrap(), Step::Continue);
        assert_eq!(machine.state(), "s0");
        assert_eq!(machine.head(), 1);
        // The right edge is only materialized on the next read.
        assert_eq!(machine.tape().len(), 1);

        assert_eq!(machine.step().unwrap(), Step::Continue);
        assert_eq!(machine.tape().symbols(), vec!["1", "1"]);
        assert_eq!(machine.state(), "halt");

        assert_eq!(machine.step().unwrap(), Step::Halt);
        assert_eq!(machine.step_count(), 2);
    }

    #[test]
    fn test_right_extension() {
        let program = unary_increment();
        let mut machine = TuringMachine::new(&program, 2, symbols(&["1", "1"])).unwrap();

        machine.step().unwrap();
        assert_eq!(machine.tape().symbols(), vec!["1", "1", "1"]);
        assert!(machine.is_halted());
    }

    #[test]
    fn test_left_extension() {
        let program = Program::new(
            "_",
            "s0",
            "halt",
            vec![
                TransitionRule::new("s0", "a", "s0", "a", Direction::Left),
                TransitionRule::new("s0", "_", "back", "X", Direction::Right),
                TransitionRule::new("back", "a", "halt", "a", Direction::Right),
            ],
        )
        .unwrap();

        let mut machine = TuringMachine::new(&program, 0, symbols(&["a", "b"])).unwrap();

        machine.step().unwrap();
        assert_eq!(machine.head(), -1);
        assert_eq!(machine.tape().len(), 2);

        machine.step().unwrap();
        assert_eq!(machine.tape().symbols(), vec!["X", "a", "b"]);
        assert_eq!(machine.head(), 1);

        assert_eq!(machine.run().unwrap(), vec!["X", "a", "b"]);
        assert_eq!(machine.head(), 2);
    }

    #[test]
    fn test_head_starting_left_of_tape() {
        let program = unary_increment();
        let tape = run(&program, -1, symbols(&["1"])).unwrap();

        assert_eq!(tape, vec!["1", "1"]);
    }

    #[test]
    fn test_initial_state_is_final() {
        let program = Program::new("_", "done", "done", vec![]).unwrap();
        let mut machine = TuringMachine::new(&program, 1, symbols(&["a"])).unwrap();

        assert_eq!(machine.run().unwrap(), vec!["a"]);
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_undefined_transition() {
        let program = Program::new(
            "_",
            "s0",
            "halt",
            vec![TransitionRule::new("s0", "1", "halt", "1", Direction::Right)],
        )
        .unwrap();

        let mut machine = TuringMachine::with_blank_tape(&program);
        let result = machine.run();

        match result {
            Err(TuringMachineError::UndefinedTransition { state, symbol }) => {
                assert_eq!(state, "s0");
                assert_eq!(symbol, "_");
            }
            _ => panic!("Expected an undefined transition, but got {:?}", result),
        }

        assert_eq!(machine.state(), "s0");
        assert_eq!(machine.step_count(), 0);
    }

    #[test]
    fn test_step_limit() {
        let program = Program::new(
            "_",
            "loop",
            "halt",
            vec![TransitionRule::new("loop", "_", "loop", "_", Direction::Right)],
        )
        .unwrap();

        let mut machine = TuringMachine::with_blank_tape(&program);
        let error = machine.run_with_limit(50).unwrap_err();

        assert_eq!(error, TuringMachineError::StepLimitExceeded(50));
        assert_eq!(machine.step_count(), 50);
        assert_eq!(machine.tape().len(), 50);
    }

    #[test]
    fn test_step_limit_not_reached() {
        let program = unary_increment();
        let mut machine = TuringMachine::new(&program, 0, symbols(&["1", "1"])).unwrap();

        assert_eq!(machine.run_with_limit(3).unwrap(), vec!["1", "1", "1"]);
        assert_eq!(machine.step_count(), 3);
    }
}
