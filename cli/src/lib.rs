//! Silent Struggle CLI
//!
//! Reads a feedback CSV, labels every row with a [`Detection`] and reports
//! the high ratings that hide hesitant language.
//!
//! ## Commands
//!
//! - `silent-struggle analyze <FILE> [--json] [--export PATH]`
//! - `silent-struggle export <FILE> [-o PATH]`
//! - `silent-struggle classify --rating N [--comment TEXT] [--json]`
//! - `silent-struggle example [-o PATH]`
//!
//! `FILE` may be `-` for stdin.
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 2: Input is missing required columns
//! - 3: Unreadable input, bad config, or failed write
//!
//! [`Detection`]: silent_struggle_core::Detection

pub mod analyze_cmd;
pub mod classify_cmd;
pub mod example_cmd;
pub mod export_cmd;
pub mod render;

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use silent_struggle_core::{
    Classifier, DetectorConfig, DetectorError, ErrorCategory, FeedbackTable, REQUIRED_COLUMNS,
};

use crate::analyze_cmd::AnalyzeArgs;
use crate::classify_cmd::ClassifyArgs;
use crate::example_cmd::ExampleArgs;
use crate::export_cmd::ExportArgs;
use crate::render::Palette;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_MISSING_COLUMNS: i32 = 2;
pub const EXIT_FAILURE: i32 = 3;

/// Path argument meaning stdin (for input) or stdout (for output).
pub const STDIO_PATH: &str = "-";

const LONG_ABOUT: &str = "\
Detect users who give high ratings but use hesitant language.

A rating of 4 or more whose comment contains a hedge phrase (\"okay\", \
\"I guess\", \"not sure\", ...) is a Silent Struggle. Ratings of 2 or less \
are Strong Negatives. Everything else is a Clear Opinion.

The input CSV needs id, rating, comment and date columns. Run \
`silent-struggle example` for a sample file.";

/// Silent Struggle detector for product feedback
#[derive(Debug, Parser)]
#[command(name = "silent-struggle", version, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Config file (default: $SILENT_STRUGGLE_CONFIG or ~/.config/silent-struggle/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a feedback file and print the report
    Analyze(AnalyzeArgs),

    /// Classify a feedback file and write it back out with a Detection column
    Export(ExportArgs),

    /// Classify a single rating and comment
    Classify(ClassifyArgs),

    /// Print a sample feedback file in the expected format
    Example(ExampleArgs),
}

/// Shared state handed to every subcommand.
#[derive(Debug)]
pub struct CommandContext {
    pub config: DetectorConfig,
    pub palette: Palette,
}

impl CommandContext {
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.config.hedge_vocabulary())
    }
}

impl Cli {
    pub fn run(self) -> i32 {
        let config = match DetectorConfig::load(self.config.as_deref()) {
            Ok(config) => config,
            Err(err) => return report_error(&err.into()),
        };
        let palette = Palette::detect(config.output.color && !self.no_color);
        let ctx = CommandContext { config, palette };

        let result = match self.command {
            Command::Analyze(args) => analyze_cmd::run(args, &ctx),
            Command::Export(args) => export_cmd::run(args, &ctx),
            Command::Classify(args) => classify_cmd::run(args, &ctx),
            Command::Example(args) => example_cmd::run(args),
        };

        match result {
            Ok(()) => EXIT_SUCCESS,
            Err(err) => report_error(&err),
        }
    }
}

/// Exit code for a detector error category.
pub fn exit_code(category: ErrorCategory) -> i32 {
    if category.is_user_validation() {
        EXIT_MISSING_COLUMNS
    } else {
        EXIT_FAILURE
    }
}

fn report_error(err: &anyhow::Error) -> i32 {
    let Some(detector_err) = err.downcast_ref::<DetectorError>() else {
        eprintln!("❌ Error: {err:#}");
        return EXIT_FAILURE;
    };

    tracing::debug!(category = detector_err.category().as_str(), "command failed");
    if let Some(missing) = detector_err.missing_columns() {
        eprintln!(
            "❌ Missing required columns! Your CSV must have: {}",
            REQUIRED_COLUMNS.join(", ")
        );
        eprintln!("   Missing: {}", missing.join(", "));
    } else {
        eprintln!("❌ Error: {err:#}");
    }
    exit_code(detector_err.category())
}

pub(crate) fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Load a feedback table from a path, or stdin for `-`.
pub(crate) fn load_table(input: &Path) -> silent_struggle_core::Result<FeedbackTable> {
    if is_stdio(input) {
        FeedbackTable::from_reader(std::io::stdin().lock())
    } else {
        FeedbackTable::from_path(input)
    }
}

/// Write all of `bytes` and flush. A reader that hung up early (`| head`)
/// is not an error.
fn write_until_closed<W: Write>(mut writer: W, bytes: &[u8]) -> std::io::Result<()> {
    match writer.write_all(bytes).and_then(|()| writer.flush()) {
        Err(err) if err.kind() == ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed by reader");
            Ok(())
        }
        result => result,
    }
}

/// Write `text` to stdout.
pub(crate) fn write_stdout(text: &str) -> anyhow::Result<()> {
    write_until_closed(std::io::stdout().lock(), text.as_bytes())
        .context("failed to write to stdout")
}

/// Write `bytes` to a file, or stdout for `-`.
pub(crate) fn write_output(output: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if is_stdio(output) {
        write_until_closed(std::io::stdout().lock(), bytes).context("failed to write to stdout")?;
    } else {
        std::fs::write(output, bytes)
            .with_context(|| format!("failed to write {}", output.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(exit_code(ErrorCategory::ValidationError), EXIT_MISSING_COLUMNS);
        assert_eq!(exit_code(ErrorCategory::InputError), EXIT_FAILURE);
        assert_eq!(exit_code(ErrorCategory::ConfigError), EXIT_FAILURE);
        assert_eq!(exit_code(ErrorCategory::OutputError), EXIT_FAILURE);
    }

    #[test]
    fn test_missing_columns_maps_to_exit_two() {
        let err = FeedbackTable::from_reader("id,comment\n1,hi\n".as_bytes()).unwrap_err();
        assert_eq!(report_error(&err.into()), EXIT_MISSING_COLUMNS);
    }

    #[test]
    fn test_negative_rating_parses() {
        let cli = Cli::try_parse_from(["silent-struggle", "classify", "--rating", "-3"]).unwrap();
        match cli.command {
            Command::Classify(args) => assert_eq!(args.rating, -3),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    /// Writer whose reader has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Writer that always fails for some other reason.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_closed_reader_is_not_an_error() {
        assert!(write_until_closed(ClosedPipe, b"id,rating\n").is_ok());
    }

    #[test]
    fn test_other_write_errors_propagate() {
        let err = write_until_closed(FullDisk, b"id,rating\n").unwrap_err();
        assert_eq!(err.to_string(), "no space left");
    }

    #[test]
    fn test_write_until_closed_writes_everything() {
        let mut buf = Vec::new();
        write_until_closed(&mut buf, b"abc").unwrap();
        assert_eq!(buf, b"abc");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["silent-struggle", "example", "--no-color", "-v"]).unwrap();
        assert!(cli.no_color);
        assert!(cli.verbose);
    }
}
