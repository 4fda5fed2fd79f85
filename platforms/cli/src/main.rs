use clap::{CommandFactory, Parser};
use std::io;
use std::path::PathBuf;
use turing::analyzer::analyze;
use turing::loader::ProgramLoader;
use turing::machine::TuringMachine;
use turing::programs::ProgramManager;
use turing::{Definition, Symbol, TuringMachineError};

const LONG_ABOUT: &str = "Reads the definition of a Turing machine from a file or standard \
input and simulates its execution, printing the final tape.

The format of the definition follows:

    head position    (if -t is specified)
    tape             (if -t is specified)
    blank symbol
    initial state
    final state
    transition rules

The format of a transition rule is:

    current_state input next_state output move

where move is l (left) or r (right).";

#[derive(Parser)]
#[clap(author, version, about, long_about = LONG_ABOUT)]
struct Cli {
    /// The Turing machine definition to execute; standard input is read when omitted
    file: Option<PathBuf>,

    /// The definition starts with a head position and a tape
    #[clap(short, long)]
    tape: bool,

    /// Run a built-in program instead of reading a definition
    #[clap(short, long, conflicts_with_all = ["file", "tape"])]
    builtin: Option<String>,

    /// List the built-in programs
    #[clap(short, long)]
    list: bool,

    /// Report likely mistakes in the definition without running it
    #[clap(short, long)]
    check: bool,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Stop with an error after this many steps
    #[clap(short, long)]
    max_steps: Option<usize>,

    /// Print the final tape as a JSON array
    #[clap(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), TuringMachineError> {
    if cli.list {
        list_programs()?;
        return Ok(());
    }

    let Some(definition) = load_definition(cli)? else {
        return Cli::command()
            .print_help()
            .map_err(|e| TuringMachineError::FileError(e.to_string()));
    };

    if cli.check {
        let warnings = analyze(&definition.program);
        if warnings.is_empty() {
            println!("No problems found");
        }
        for warning in warnings {
            println!("warning: {}", warning);
        }
        return Ok(());
    }

    let mut machine = definition.machine()?;

    let tape = if cli.debug {
        for warning in analyze(&definition.program) {
            eprintln!("warning: {}", warning);
        }
        run_debug(&mut machine, cli.max_steps)?
    } else if let Some(max_steps) = cli.max_steps {
        machine.run_with_limit(max_steps)?
    } else {
        machine.run()?
    };

    if cli.json {
        println!("{}", serde_json::Value::from(tape));
    } else {
        println!("{}", tape.join(" "));
    }

    Ok(())
}

/// Loads the definition from a built-in program, a file, or piped standard input.
///
/// Returns `None` when there is nothing to read and standard input is a terminal.
fn load_definition(cli: &Cli) -> Result<Option<Definition>, TuringMachineError> {
    if let Some(name) = &cli.builtin {
        ProgramManager::get_program_by_name(name).map(Some)
    } else if let Some(path) = &cli.file {
        ProgramLoader::load_program(path, cli.tape).map(Some)
    } else if atty::isnt(atty::Stream::Stdin) {
        ProgramLoader::load_from_reader(io::stdin().lock(), cli.tape).map(Some)
    } else {
        Ok(None)
    }
}

fn list_programs() -> Result<(), TuringMachineError> {
    for index in 0..ProgramManager::get_program_count() {
        let info = ProgramManager::get_program_info(index)?;
        println!(
            "{:<18} {} -> {}, {} states, {} transitions, tape: {}",
            info.name,
            info.initial_state,
            info.final_state,
            info.state_count,
            info.transition_count,
            info.initial_tape
        );
    }

    Ok(())
}

/// Runs the machine one step at a time, printing its configuration after each step.
fn run_debug(
    machine: &mut TuringMachine,
    max_steps: Option<usize>,
) -> Result<Vec<Symbol>, TuringMachineError> {
    print_state(machine);

    while !machine.is_halted() {
        if let Some(max_steps) = max_steps {
            if machine.step_count() >= max_steps {
                return Err(TuringMachineError::StepLimitExceeded(max_steps));
            }
        }

        machine.step()?;
        print_state(machine);
    }

    println!("\nMachine halted.\n\nFinal tape:");

    Ok(machine.tape().symbols())
}

fn print_state(machine: &TuringMachine) {
    println!(
        "Step: {}, State: {}, Head: {}, Tape: [{}]",
        machine.step_count(),
        machine.state(),
        machine.head(),
        machine.tape()
    );
}
