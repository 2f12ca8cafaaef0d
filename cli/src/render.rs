//! Terminal rendering for analysis reports.
//!
//! Every function returns a `String` so the layout can be tested without a
//! terminal; callers decide where it goes.

use std::borrow::Cow;

use owo_colors::{OwoColorize, Style};
use serde_json::{Value as JsonValue, json};
use silent_struggle_core::{
    AnnotatedRow, AnnotatedTable, DETECTION_COLUMN, Detection, DetectionSummary,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ratings above this still render this many stars.
const MAX_STARS: usize = 10;

const COLUMN_GAP: &str = "  ";

/// Terminal styling, disabled when stdout cannot show color.
#[derive(Debug, Clone)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Enable color only if `wanted` and stdout supports it.
    pub fn detect(wanted: bool) -> Self {
        Self {
            enabled: wanted && supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, Style::new().bold())
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, Style::new().green())
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }

    pub fn detection(&self, detection: Detection) -> String {
        let style = match detection {
            Detection::SilentStruggle => Style::new().yellow().bold(),
            Detection::StrongNegative => Style::new().red(),
            Detection::ClearOpinion => Style::new().green(),
        };
        self.paint(&detection.display_form(), style)
    }
}

/// `⭐` once per rating point; nothing for ratings <= 0.
pub fn star_rating(rating: i64) -> String {
    let stars = usize::try_from(rating).unwrap_or(0).min(MAX_STARS);
    "⭐".repeat(stars)
}

/// Cut `text` to at most `max_width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> Cow<'_, str> {
    if text.width() <= max_width {
        return Cow::Borrowed(text);
    }

    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut end = 0;
    for (i, ch) in text.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        end = i + ch.len_utf8();
    }
    Cow::Owned(format!("{}…", &text[..end]))
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n', '\t'], " ")
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// The annotated table: id, rating, comment, date, Detection.
pub fn render_table(table: &AnnotatedTable, comment_width: usize, palette: &Palette) -> String {
    let headers = ["id", "rating", "comment", "date", DETECTION_COLUMN];

    let rows: Vec<(Detection, [String; 4])> = table
        .rows()
        .iter()
        .map(|row| {
            let entry = row.entry();
            let comment = single_line(&entry.comment);
            (
                row.detection(),
                [
                    single_line(&entry.id),
                    entry.rating.to_string(),
                    truncate_to_width(&comment, comment_width).into_owned(),
                    single_line(&entry.date),
                ],
            )
        })
        .collect();

    let mut widths = headers.map(UnicodeWidthStr::width);
    for (detection, cells) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
        widths[4] = widths[4].max(detection.display_form().width());
    }

    let mut out = String::new();

    let header_line = headers
        .iter()
        .zip(widths)
        .map(|(header, width)| pad(header, width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(&palette.heading(header_line.trim_end()));
    out.push('\n');

    let rule = widths
        .iter()
        .map(|width| "─".repeat(*width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(&rule);
    out.push('\n');

    for (detection, cells) in &rows {
        let mut line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        line.push_str(COLUMN_GAP);
        line.push_str(&palette.detection(*detection));
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// One line per detection with its count.
pub fn render_summary(summary: &DetectionSummary, palette: &Palette) -> String {
    let names: Vec<String> = Detection::ALL
        .iter()
        .map(|detection| format!("{} {}s", detection.glyph(), detection.label()))
        .collect();
    let width = names.iter().map(|name| name.width()).max().unwrap_or(0);

    let mut out = String::new();
    for (detection, name) in Detection::ALL.iter().zip(&names) {
        let count = summary.count(*detection).to_string();
        out.push_str(&format!("{}{COLUMN_GAP}{}\n", pad(name, width), palette.heading(&count)));
    }
    out
}

fn render_case(row: &AnnotatedRow) -> String {
    let entry = row.entry();
    format!(
        "Feedback ID: {}\nRating:      {} ({}/5)\nDate:        {}\nComment:     \"{}\"\n",
        entry.id,
        star_rating(entry.rating),
        entry.rating,
        entry.date,
        entry.comment
    )
}

/// Detail cards for every silent struggle, or a note that there are none.
pub fn render_silent_struggles(table: &AnnotatedTable, palette: &Palette) -> String {
    let cases: Vec<&AnnotatedRow> = table.silent_struggles().collect();
    if cases.is_empty() {
        return format!(
            "{}\n",
            palette.success("🎉 No Silent Struggles detected! All feedback is clear.")
        );
    }

    let mut out = palette.warning(&format!(
        "Found {} cases where users gave high ratings but used hesitant language!",
        cases.len()
    ));
    out.push_str("\n\n");
    for row in cases {
        out.push_str(&render_case(row));
        out.push_str("---\n");
    }
    out
}

/// Full text report for `analyze`.
pub fn render_report(table: &AnnotatedTable, comment_width: usize, palette: &Palette) -> String {
    let mut out = palette.success(&format!(
        "✅ File loaded successfully! Found {} feedback entries.",
        table.len()
    ));
    out.push_str("\n\n");

    out.push_str(&palette.heading("📊 All Feedback"));
    out.push_str("\n\n");
    out.push_str(&render_table(table, comment_width, palette));
    out.push('\n');

    out.push_str(&palette.heading("📈 Summary"));
    out.push_str("\n\n");
    out.push_str(&render_summary(&table.summary(), palette));
    out.push('\n');

    out.push_str(&palette.heading("⚠️  Silent Struggle Cases (Need Attention!)"));
    out.push_str("\n\n");
    out.push_str(&render_silent_struggles(table, palette));
    out
}

/// Machine-readable form of [`render_report`].
pub fn analysis_json(table: &AnnotatedTable) -> JsonValue {
    let entries: Vec<JsonValue> = table
        .rows()
        .iter()
        .map(|row| {
            let entry = row.entry();
            json!({
                "id": entry.id,
                "rating": entry.rating,
                "comment": entry.comment,
                "date": entry.date,
                "detection": row.detection(),
                "display": row.detection().display_form(),
            })
        })
        .collect();

    let cases: Vec<JsonValue> = table
        .silent_struggles()
        .map(|row| {
            let entry = row.entry();
            json!({
                "id": entry.id,
                "rating": entry.rating,
                "stars": star_rating(entry.rating),
                "date": entry.date,
                "comment": entry.comment,
            })
        })
        .collect();

    json!({
        "rows": table.len(),
        "summary": table.summary(),
        "entries": entries,
        "silent_struggles": cases,
    })
}
