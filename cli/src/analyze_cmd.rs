//! `silent-struggle analyze`

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use crate::{CommandContext, is_stdio, load_table, render, write_stdout};

/// Arguments for `analyze`
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Feedback CSV with id, rating, comment and date columns (`-` for stdin)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output as JSON for automation
    #[arg(long)]
    pub json: bool,

    /// Also write the annotated CSV to PATH (use `export -o -` for stdout)
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

pub fn run(args: AnalyzeArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    // The report already owns stdout.
    if args.export.as_deref().is_some_and(is_stdio) {
        bail!("--export cannot write to stdout; use `silent-struggle export <FILE> -o -`");
    }

    let table = load_table(&args.input)?.annotate(&ctx.classifier());

    if args.json {
        let json = render::analysis_json(&table);
        let mut text = serde_json::to_string_pretty(&json).context("failed to serialize analysis")?;
        text.push('\n');
        write_stdout(&text)?;
    } else {
        write_stdout(&render::render_report(
            &table,
            ctx.config.output.comment_width,
            &ctx.palette,
        ))?;
    }

    if let Some(path) = args.export {
        table.write_csv_path(&path)?;
        if !args.json {
            write_stdout(&format!(
                "\n💾 Analysis results written to {}\n",
                path.display()
            ))?;
        }
    }

    Ok(())
}
