//! Feedback classification
//!
//! Maps a single `(rating, comment)` pair to a [`Detection`]. The rule is
//! evaluated in order, first match wins:
//! 1. rating >= 4 and the comment contains a hedge phrase → Silent Struggle
//! 2. rating <= 2 → Strong Negative
//! 3. otherwise → Clear Opinion
//!
//! Ratings outside 1-5 are not rejected; they flow through the same two
//! comparisons.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::vocabulary::HedgeVocabulary;

/// Lowest rating at which hedging language counts as a silent struggle.
pub const SILENT_STRUGGLE_MIN_RATING: i64 = 4;

/// Highest rating treated as a strong negative.
pub const STRONG_NEGATIVE_MAX_RATING: i64 = 2;

/// Outcome of classifying one feedback entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Detection {
    /// High rating with hedging language
    SilentStruggle,
    /// Low rating, taken at face value
    StrongNegative,
    /// Neither of the above
    ClearOpinion,
}

impl Detection {
    /// All detections in summary order.
    pub const ALL: [Detection; 3] = [
        Detection::SilentStruggle,
        Detection::StrongNegative,
        Detection::ClearOpinion,
    ];

    /// Machine-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SilentStruggle => "SILENT_STRUGGLE",
            Self::StrongNegative => "STRONG_NEGATIVE",
            Self::ClearOpinion => "CLEAR_OPINION",
        }
    }

    /// Human-readable name without glyph
    pub fn label(&self) -> &'static str {
        match self {
            Self::SilentStruggle => "Silent Struggle",
            Self::StrongNegative => "Strong Negative",
            Self::ClearOpinion => "Clear Opinion",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::SilentStruggle => "🟡",
            Self::StrongNegative => "🔴",
            Self::ClearOpinion => "🟢",
        }
    }

    /// Value written to the `Detection` column, e.g. `🟡 Silent Struggle`
    pub fn display_form(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph(), self.label())
    }
}

impl FromStr for Detection {
    type Err = String;

    /// Accepts the machine name, the label, or the display form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        for detection in Self::ALL {
            let label = trimmed
                .strip_prefix(detection.glyph())
                .map(str::trim_start)
                .unwrap_or(trimmed);
            if label.eq_ignore_ascii_case(detection.as_str())
                || label.eq_ignore_ascii_case(detection.label())
            {
                return Ok(detection);
            }
        }
        Err(format!("Unknown detection: {s}"))
    }
}

/// Classify one entry against `vocabulary`.
pub fn classify(rating: i64, comment: &str, vocabulary: &HedgeVocabulary) -> Detection {
    if rating >= SILENT_STRUGGLE_MIN_RATING && vocabulary.contains_hedge(comment) {
        Detection::SilentStruggle
    } else if rating <= STRONG_NEGATIVE_MAX_RATING {
        Detection::StrongNegative
    } else {
        Detection::ClearOpinion
    }
}

/// Detection plus the hedge phrases found in the comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub detection: Detection,
    /// Every hedge phrase present, whether or not it decided the outcome
    pub matched_phrases: Vec<String>,
}

/// Classifier bound to one hedge vocabulary
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    vocabulary: HedgeVocabulary,
}

impl Classifier {
    pub fn new(vocabulary: HedgeVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &HedgeVocabulary {
        &self.vocabulary
    }

    pub fn classify(&self, rating: i64, comment: &str) -> Detection {
        let detection = classify(rating, comment, &self.vocabulary);
        tracing::trace!(rating, detection = detection.as_str(), "classified entry");
        detection
    }

    /// Classify and report which hedge phrases matched.
    pub fn explain(&self, rating: i64, comment: &str) -> Classification {
        Classification {
            detection: self.classify(rating, comment),
            matched_phrases: self
                .vocabulary
                .matched_phrases(comment)
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
