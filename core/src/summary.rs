//! Per-detection counts over an annotated table.

use serde::Serialize;

use crate::classifier::Detection;

/// Number of rows per detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetectionSummary {
    pub silent_struggle: usize,
    pub strong_negative: usize,
    pub clear_opinion: usize,
}

impl DetectionSummary {
    /// Count detections in a single pass.
    pub fn from_detections<I>(detections: I) -> Self
    where
        I: IntoIterator<Item = Detection>,
    {
        let mut summary = Self::default();
        for detection in detections {
            match detection {
                Detection::SilentStruggle => summary.silent_struggle += 1,
                Detection::StrongNegative => summary.strong_negative += 1,
                Detection::ClearOpinion => summary.clear_opinion += 1,
            }
        }
        summary
    }

    pub fn count(&self, detection: Detection) -> usize {
        match detection {
            Detection::SilentStruggle => self.silent_struggle,
            Detection::StrongNegative => self.strong_negative,
            Detection::ClearOpinion => self.clear_opinion,
        }
    }

    /// Equals the number of rows counted
    pub fn total(&self) -> usize {
        self.silent_struggle + self.strong_negative + self.clear_opinion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_summary() {
        let summary = DetectionSummary::from_detections(std::iter::empty());
        assert_eq!(summary, DetectionSummary::default());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_counts_each_detection() {
        let summary = DetectionSummary::from_detections([
            Detection::SilentStruggle,
            Detection::ClearOpinion,
            Detection::SilentStruggle,
            Detection::StrongNegative,
        ]);
        assert_eq!(summary.count(Detection::SilentStruggle), 2);
        assert_eq!(summary.count(Detection::StrongNegative), 1);
        assert_eq!(summary.count(Detection::ClearOpinion), 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_serializes_with_snake_case_keys() {
        let summary = DetectionSummary {
            silent_struggle: 1,
            strong_negative: 2,
            clear_opinion: 3,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "silent_struggle": 1,
                "strong_negative": 2,
                "clear_opinion": 3,
            })
        );
    }
}
