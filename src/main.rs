use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use std::fs::read_to_string;
use std::io;
use std::process;
use tracing_subscriber::prelude::*;

/// Cycle-stepped emulator for the VerySimple16bit CPU
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program file: one 16-bit binary literal per line
    filename: String,
}

fn main() -> anyhow::Result<()> {
    let stderr_format = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    tracing_subscriber::registry().with(stderr_format).init();

    let args = Args::try_parse().unwrap_or_else(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            // Missing/extra arguments: usage on stderr, exit status 1.
            let _ = err.print();
            process::exit(1);
        }
    });
    let source = read_to_string(&args.filename)
        .with_context(|| format!("could not read program file '{}'", args.filename))?;
    verysimple16::run_program(&source)?;
    Ok(())
}
