//! Built-in example machines, embedded at compile time and parsed on first use.

use crate::parser::parse_with_tape;
use crate::types::{Definition, TuringMachineError};

// Default embedded programs, all in the tape layout.
const PROGRAM_TEXTS: [(&str, &str); 4] = [
    ("unary-increment", include_str!("../programs/unary-increment.tm")),
    ("binary-increment", include_str!("../programs/binary-increment.tm")),
    ("invert-bits", include_str!("../programs/invert-bits.tm")),
    ("busy-beaver-2", include_str!("../programs/busy-beaver-2.tm")),
];

/// A parsed built-in program.
#[derive(Debug, Clone)]
pub struct BuiltinProgram {
    pub name: &'static str,
    pub text: &'static str,
    pub definition: Definition,
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<BuiltinProgram> = PROGRAM_TEXTS
        .iter()
        .filter_map(|&(name, text)| {
            parse_with_tape(text).ok().map(|definition| BuiltinProgram {
                name,
                text,
                definition,
            })
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Definition, TuringMachineError> {
        PROGRAMS
            .get(index)
            .map(|builtin| builtin.definition.clone())
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program index {} out of range", index))
            })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Definition, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|builtin| builtin.name == name)
            .map(|builtin| builtin.definition.clone())
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|builtin| builtin.name).collect()
    }

    /// Get the original text of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, TuringMachineError> {
        PROGRAMS.get(index).map(|builtin| builtin.text).ok_or_else(|| {
            TuringMachineError::ValidationError(format!(
                "Program text index {} out of range",
                index
            ))
        })
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let builtin = PROGRAMS.get(index).ok_or_else(|| {
            TuringMachineError::ValidationError(format!("Program index {} out of range", index))
        })?;
        let program = &builtin.definition.program;

        Ok(ProgramInfo {
            index,
            name: builtin.name.to_string(),
            initial_state: program.initial_state().to_string(),
            final_state: program.final_state().to_string(),
            initial_tape: builtin.definition.tape.join(" "),
            state_count: program.states().len(),
            transition_count: program.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub final_state: String,
    pub initial_tape: String,
    pub state_count: usize,
    pub transition_count: usize,
}
