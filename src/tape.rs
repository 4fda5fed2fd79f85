//! This module defines the `Tape`, the machine's read/write storage.
//!
//! The tape is conceptually unbounded in both directions. Only the cells the head has
//! visited (plus the initial content) are materialized; growing by one cell on either end
//! is O(1) amortized.

use crate::types::Symbol;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<Symbol>,
    blank: Symbol,
}

impl Tape {
    /// Creates a tape holding `cells`, padding with `blank` when it grows.
    pub fn new(cells: impl IntoIterator<Item = Symbol>, blank: impl Into<Symbol>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            blank: blank.into(),
        }
    }

    /// Creates a tape with a single blank cell.
    pub fn blank(blank: impl Into<Symbol>) -> Self {
        let blank = blank.into();
        Self {
            cells: VecDeque::from([blank.clone()]),
            blank,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn blank_symbol(&self) -> &str {
        &self.blank
    }

    /// Returns the symbol at `index`, or `None` if the cell is not materialized.
    pub fn read(&self, index: usize) -> Option<&Symbol> {
        self.cells.get(index)
    }

    /// Overwrites the symbol at `index`. Returns `false` if the cell is not materialized.
    pub fn write(&mut self, index: usize, symbol: Symbol) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = symbol;
                true
            }
            None => false,
        }
    }

    /// Prepends one blank cell; every existing cell shifts one index to the right.
    pub fn extend_left(&mut self) {
        self.cells.push_front(self.blank.clone());
    }

    /// Appends one blank cell.
    pub fn extend_right(&mut self) {
        self.cells.push_back(self.blank.clone());
    }

    /// Returns the materialized cells from left to right.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.cells.iter().cloned().collect()
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.cells.into()
    }
}

impl fmt::Display for Tape {
    /// Renders the cells separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = self.cells.iter();
        if let Some(first) = cells.next() {
            write!(f, "{first}")?;
            for cell in cells {
                write!(f, " {cell}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tape(cells: &[&str]) -> Tape {
        Tape::new(cells.iter().map(|s| s.to_string()), "_")
    }

    #[test]
    fn test_blank_tape() {
        let tape = Tape::blank("_");
        assert_eq!(tape.len(), 1);
        assert_eq!(tape.read(0).unwrap(), "_");
        assert_eq!(tape.blank_symbol(), "_");
    }

    #[test]
    fn test_extend_left_shifts_cells() {
        let mut tape = tape(&["a", "b"]);
        tape.extend_left();

        assert_eq!(tape.len(), 3);
        assert_eq!(tape.symbols(), vec!["_", "a", "b"]);
        assert_eq!(tape.read(1).unwrap(), "a");
    }

    #[test]
    fn test_extend_right_appends_blank() {
        let mut tape = tape(&["a", "b"]);
        tape.extend_right();

        assert_eq!(tape.len(), 3);
        assert_eq!(tape.read(2).unwrap(), "_");
    }

    #[test]
    fn test_write() {
        let mut tape = tape(&["a"]);
        assert!(tape.write(0, "z".into()));
        assert!(!tape.write(1, "z".into()));
        assert_eq!(tape.into_symbols(), vec!["z"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(tape(&["1", "0", "_"]).to_string(), "1 0 _");
        assert_eq!(tape(&[]).to_string(), "");
    }
}
