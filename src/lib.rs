#![warn(
    clippy::cargo,
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::pedantic,
    clippy::nursery,
    clippy::arithmetic_side_effects,
    clippy::format_push_string,
    clippy::if_then_some_else_none,
    clippy::missing_asserts_for_indexing,
    clippy::redundant_type_annotations,
    clippy::unwrap_in_result
)]
mod cpu;
mod loader;
mod types;

pub use cpu::{Machine, Memory, RunError, DEFAULT_CYCLES, MEMORY_WORDS, REGISTER_COUNT};
pub use loader::{parse_program, LoadError};
pub use types::{Address, Instruction, Opcode};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Run(#[from] RunError),
}

/// Loads `source` into a fresh machine and runs it for the default cycle
/// budget, tracing each cycle to stdout.
///
/// # Errors
///
/// Will return an `Err` if the program could not be parsed or the trace
/// could not be written.
pub fn run_program(source: &str) -> Result<(), Error> {
    let mut machine = Machine::new();
    machine.load_program(source)?;
    machine.run(DEFAULT_CYCLES, &mut std::io::stdout())?;
    Ok(())
}
