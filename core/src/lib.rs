//! Silent Struggle detection for rated user feedback
//!
//! Classifies each `(rating, comment)` pair into one of three detections:
//! - **Silent Struggle**: a high rating paired with hedging language
//! - **Strong Negative**: a low rating, whatever the wording
//! - **Clear Opinion**: everything else
//!
//! The classifier is a pure function. Everything around it (loading a
//! feedback CSV, validating its columns, appending the `Detection` column,
//! counting labels, exporting) lives in [`table`] and [`summary`].

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod classifier;
pub mod config;
pub mod errors;
pub mod sample;
pub mod summary;
pub mod table;
pub mod vocabulary;

pub use classifier::{
    Classification, Classifier, Detection, STRONG_NEGATIVE_MAX_RATING,
    SILENT_STRUGGLE_MIN_RATING, classify,
};
pub use config::{DetectorConfig, OutputConfig, VocabularyConfig};
pub use errors::{DetectorError, ErrorCategory, Result};
pub use sample::{EXAMPLE_CSV, example_table};
pub use summary::DetectionSummary;
pub use table::{
    AnnotatedRow, AnnotatedTable, DETECTION_COLUMN, FeedbackEntry, FeedbackTable,
    REQUIRED_COLUMNS,
};
pub use vocabulary::{CANONICAL_HEDGE_PHRASES, HedgeVocabulary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
