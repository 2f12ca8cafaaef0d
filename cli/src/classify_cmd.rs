//! `silent-struggle classify`
//!
//! Classifies one rating and comment without a CSV. Handy for checking how
//! a vocabulary change affects a specific comment.

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use silent_struggle_core::Classification;

use crate::{CommandContext, write_stdout};
use crate::render::Palette;

/// Arguments for `classify`
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Star rating (normally 1-5)
    #[arg(short, long, allow_negative_numbers = true)]
    pub rating: i64,

    /// Free-text comment
    #[arg(short, long, default_value = "")]
    pub comment: String,

    /// Output as JSON for automation
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ClassifyArgs, ctx: &CommandContext) -> anyhow::Result<()> {
    let classification = ctx.classifier().explain(args.rating, &args.comment);

    if args.json {
        let output = json!({
            "rating": args.rating,
            "comment": args.comment,
            "detection": classification.detection,
            "display": classification.detection.display_form(),
            "matched_phrases": classification.matched_phrases,
        });
        let mut text =
            serde_json::to_string_pretty(&output).context("failed to serialize classification")?;
        text.push('\n');
        write_stdout(&text)?;
    } else {
        write_stdout(&format_classification(&classification, &ctx.palette))?;
    }
    Ok(())
}

fn format_classification(classification: &Classification, palette: &Palette) -> String {
    let phrases = if classification.matched_phrases.is_empty() {
        "none".to_string()
    } else {
        classification.matched_phrases.join(", ")
    };
    format!(
        "{}\nHedge phrases: {phrases}\n",
        palette.detection(classification.detection)
    )
}
