//! `silent-struggle export`

use std::path::PathBuf;

use clap::Parser;

use crate::{CommandContext, is_stdio, load_table, write_output, write_stdout};

/// Arguments for `export`
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Feedback CSV with id, rating, comment and date columns (`-` for stdin)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Destination CSV (`-` for stdout; default: output.export_path from config)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let table = load_table(&args.input)?.annotate(&ctx.classifier());
    let output = args
        .output
        .unwrap_or_else(|| ctx.config.output.export_path.clone());

    let bytes = table.to_csv_bytes()?;
    write_output(&output, &bytes)?;

    if !is_stdio(&output) {
        let summary = table.summary();
        write_stdout(&format!(
            "💾 Wrote {} rows to {} (🟡 {} · 🔴 {} · 🟢 {})\n",
            table.len(),
            output.display(),
            summary.silent_struggle,
            summary.strong_negative,
            summary.clear_opinion
        ))?;
    }
    Ok(())
}
