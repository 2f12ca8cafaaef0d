//! Feedback table: CSV load, column validation, annotation and export.
//!
//! Input is a CSV file with a header row containing at least
//! [`REQUIRED_COLUMNS`]. Any other columns are carried through untouched.
//! Annotation appends a [`DETECTION_COLUMN`] holding each row's
//! [`Detection`] display form; exporting writes the same columns back out in
//! the original row order.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::classifier::{Classifier, Detection};
use crate::errors::{DetectorError, Result};
use crate::summary::DetectionSummary;

/// Columns every feedback file must have.
pub const REQUIRED_COLUMNS: [&str; 4] = ["id", "rating", "comment", "date"];

/// Column added by annotation.
pub const DETECTION_COLUMN: &str = "Detection";

/// The four fields of a row the detector knows about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackEntry {
    /// Opaque identifier, never interpreted
    pub id: String,
    pub rating: i64,
    pub comment: String,
    /// Opaque date, never interpreted
    pub date: String,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    id: usize,
    rating: usize,
    comment: usize,
    date: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self> {
        let positions = REQUIRED_COLUMNS.map(|name| headers.iter().position(|h| h == name));

        match positions {
            [Some(id), Some(rating), Some(comment), Some(date)] => Ok(Self {
                id,
                rating,
                comment,
                date,
            }),
            _ => {
                let missing: Vec<String> = REQUIRED_COLUMNS
                    .iter()
                    .zip(positions)
                    .filter(|(_, position)| position.is_none())
                    .map(|(name, _)| (*name).to_string())
                    .collect();
                Err(DetectorError::MissingColumns { missing })
            }
        }
    }

    fn entry(&self, fields: &[String], row_number: usize) -> Result<FeedbackEntry> {
        let cell = |index: usize| fields.get(index).map(String::as_str).unwrap_or_default();

        let raw_rating = cell(self.rating);
        let rating = parse_rating(raw_rating).ok_or_else(|| {
            DetectorError::input(format!(
                "row {row_number}: rating {raw_rating:?} is not an integer"
            ))
        })?;

        Ok(FeedbackEntry {
            id: cell(self.id).to_string(),
            rating,
            comment: cell(self.comment).to_string(),
            date: cell(self.date).to_string(),
        })
    }
}

/// Parse integer text, also accepting integral decimals such as `4.0`.
fn parse_rating(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
struct FeedbackRow {
    fields: Vec<String>,
    entry: FeedbackEntry,
}

/// Validated feedback rows, not yet classified
#[derive(Debug, Clone)]
pub struct FeedbackTable {
    headers: Vec<String>,
    rows: Vec<FeedbackRow>,
}

impl FeedbackTable {
    /// Load a feedback table from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            DetectorError::input_with_source(format!("failed to open {}", path.display()), e)
        })?;
        tracing::debug!(path = %path.display(), "reading feedback file");
        Self::from_reader(file)
    }

    /// Load a feedback table from any CSV source.
    ///
    /// Required columns are checked before any row is parsed, so a file
    /// with a bad header never yields partial rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| DetectorError::input_with_source("failed to read CSV header", e))?
            .iter()
            .map(String::from)
            .collect();

        if headers.is_empty() {
            return Err(DetectorError::input("feedback file is empty"));
        }

        let columns = ColumnIndex::resolve(&headers)?;

        let mut rows = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let row_number = index + 1;
            let record = record.map_err(|e| {
                DetectorError::input_with_source(format!("failed to parse row {row_number}"), e)
            })?;
            let fields: Vec<String> = record.iter().map(String::from).collect();
            let entry = columns.entry(&fields, row_number)?;
            rows.push(FeedbackRow { fields, entry });
        }

        tracing::info!(
            rows = rows.len(),
            columns = headers.len(),
            "feedback table loaded"
        );

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn entries(&self) -> impl Iterator<Item = &FeedbackEntry> {
        self.rows.iter().map(|row| &row.entry)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Classify every row, consuming the table.
    ///
    /// An existing `Detection` column is overwritten in place; otherwise one
    /// is appended after the last column.
    pub fn annotate(self, classifier: &Classifier) -> AnnotatedTable {
        let mut headers = self.headers;
        let detection_column = match headers.iter().position(|h| h == DETECTION_COLUMN) {
            Some(index) => index,
            None => {
                headers.push(DETECTION_COLUMN.to_string());
                headers.len() - 1
            }
        };

        let rows: Vec<AnnotatedRow> = self
            .rows
            .into_iter()
            .map(|row| {
                let detection = classifier.classify(row.entry.rating, &row.entry.comment);
                let mut fields = row.fields;
                let cell = detection.display_form();
                match fields.get_mut(detection_column) {
                    Some(slot) => *slot = cell,
                    None => fields.push(cell),
                }
                AnnotatedRow {
                    fields,
                    entry: row.entry,
                    detection,
                }
            })
            .collect();

        let table = AnnotatedTable { headers, rows };
        let summary = table.summary();
        tracing::info!(
            rows = table.len(),
            silent_struggle = summary.silent_struggle,
            strong_negative = summary.strong_negative,
            clear_opinion = summary.clear_opinion,
            "feedback table annotated"
        );
        table
    }
}

/// One classified row
#[derive(Debug, Clone)]
pub struct AnnotatedRow {
    fields: Vec<String>,
    entry: FeedbackEntry,
    detection: Detection,
}

impl AnnotatedRow {
    pub fn entry(&self) -> &FeedbackEntry {
        &self.entry
    }

    pub fn detection(&self) -> Detection {
        self.detection
    }

    /// All cells of the row, `Detection` included, in header order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Feedback table with a `Detection` column
#[derive(Debug, Clone)]
pub struct AnnotatedTable {
    headers: Vec<String>,
    rows: Vec<AnnotatedRow>,
}

impl AnnotatedTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[AnnotatedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows carrying `detection`, in table order
    pub fn with_detection(&self, detection: Detection) -> impl Iterator<Item = &AnnotatedRow> {
        self.rows
            .iter()
            .filter(move |row| row.detection == detection)
    }

    pub fn silent_struggles(&self) -> impl Iterator<Item = &AnnotatedRow> {
        self.with_detection(Detection::SilentStruggle)
    }

    pub fn summary(&self) -> DetectionSummary {
        DetectionSummary::from_detections(self.rows.iter().map(AnnotatedRow::detection))
    }

    /// Write the annotated table as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(&self.headers)
            .map_err(|e| DetectorError::output_with_source("failed to write CSV header", e))?;

        for (index, row) in self.rows.iter().enumerate() {
            csv_writer.write_record(&row.fields).map_err(|e| {
                DetectorError::output_with_source(format!("failed to write row {}", index + 1), e)
            })?;
        }

        csv_writer
            .flush()
            .map_err(|e| DetectorError::output_with_source("failed to flush CSV output", e))
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    pub fn write_csv_path(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| {
            DetectorError::output_with_source(format!("failed to create {}", path.display()), e)
        })?;
        self.write_csv(file)?;
        tracing::info!(path = %path.display(), rows = self.len(), "annotated table exported");
        Ok(())
    }
}
