//! This module provides the `ProgramLoader` struct, responsible for loading Turing Machine
//! definitions from files, readers such as standard input, and strings.

use crate::parser::{parse, parse_with_tape};
use crate::types::{Definition, TuringMachineError, MAX_PROGRAM_SIZE};
use std::fs;
use std::io::Read;
use std::path::Path;

/// `ProgramLoader` is a utility struct for loading Turing Machine definitions.
///
/// Every method takes a `with_tape` flag selecting the layout that starts with a head
/// position line and a tape line.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single Turing Machine definition from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Definition)` if the file is successfully read and parsed.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::ValidationError)` if the file exceeds `MAX_PROGRAM_SIZE`.
    /// * `Err(TuringMachineError::ParseError)` if the file content is not a valid definition.
    pub fn load_program(path: &Path, with_tape: bool) -> Result<Definition, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_program_from_string(&content, with_tape)
    }

    /// Loads a definition from any reader, typically standard input.
    ///
    /// Reading stops one byte past `MAX_PROGRAM_SIZE` so oversized input is rejected
    /// without buffering all of it.
    pub fn load_from_reader<R: Read>(
        reader: R,
        with_tape: bool,
    ) -> Result<Definition, TuringMachineError> {
        let mut content = String::new();
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_string(&mut content)
            .map_err(|e| TuringMachineError::FileError(format!("Failed to read input: {}", e)))?;

        Self::load_program_from_string(&content, with_tape)
    }

    /// Loads a single Turing Machine definition from the provided string content.
    pub fn load_program_from_string(
        content: &str,
        with_tape: bool,
    ) -> Result<Definition, TuringMachineError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TuringMachineError::ValidationError(format!(
                "Program exceeds the maximum size of {} bytes",
                MAX_PROGRAM_SIZE
            )));
        }

        if with_tape {
            parse_with_tape(content)
        } else {
            parse(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::{Cursor, Write};
    use tempfile::tempdir;

    #[test]
    fn test_load_valid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("increment.tm");

        let program_content = "1\n1 1\n_\ns0\nhalt\ns0 1 s0 1 r\ns0 _ halt 1 r\n";

        let mut file = File::create(&file_path).unwrap();
        file.write_all(program_content.as_bytes()).unwrap();

        let definition = ProgramLoader::load_program(&file_path, true).unwrap();
        assert_eq!(definition.head, 1);
        assert_eq!(definition.tape, vec!["1", "1"]);
        assert_eq!(definition.program.initial_state(), "s0");
        assert_eq!(definition.run().unwrap(), vec!["1", "1", "1"]);
    }

    #[test]
    fn test_load_invalid_program() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"This is not a valid program").unwrap();

        let result = ProgramLoader::load_program(&file_path, false);
        assert!(matches!(result, Err(TuringMachineError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ProgramLoader::load_program(&dir.path().join("missing.tm"), false);

        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_load_from_reader() {
        let input = Cursor::new("_\ns0\nhalt\ns0 _ halt 1 r\n");

        let definition = ProgramLoader::load_from_reader(input, false).unwrap();
        assert_eq!(definition.run().unwrap(), vec!["1"]);
    }

    #[test]
    fn test_load_oversized_input() {
        let input = Cursor::new("_".repeat(MAX_PROGRAM_SIZE + 10));

        let result = ProgramLoader::load_from_reader(input, false);
        assert!(matches!(result, Err(TuringMachineError::ValidationError(_))));
    }
}
