//! `silent-struggle example`

use std::path::PathBuf;

use clap::Parser;
use silent_struggle_core::EXAMPLE_CSV;

use crate::{STDIO_PATH, is_stdio, write_output, write_stdout};

/// Arguments for `example`
#[derive(Debug, Parser)]
pub struct ExampleArgs {
    /// Write the sample to PATH instead of stdout
    #[arg(short, long, value_name = "PATH", default_value = STDIO_PATH)]
    pub output: PathBuf,
}

pub fn run(args: ExampleArgs) -> anyhow::Result<()> {
    write_output(&args.output, EXAMPLE_CSV.as_bytes())?;
    if !is_stdio(&args.output) {
        write_stdout(&format!("📝 Example written to {}\n", args.output.display()))?;
    }
    Ok(())
}
