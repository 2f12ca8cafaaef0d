//! Property-based tests for the classification rule and table summary.

use proptest::prelude::*;
use silent_struggle_core::{
    CANONICAL_HEDGE_PHRASES, Classifier, Detection, FeedbackTable, HedgeVocabulary, classify,
};

/// Comments built from letters that cannot spell any canonical hedge phrase.
fn hedge_free_comment() -> impl Strategy<Value = String> {
    "[bcdhlmpqvxz !.,]{0,40}"
}

fn hedge_phrase() -> impl Strategy<Value = &'static str> {
    prop::sample::select(CANONICAL_HEDGE_PHRASES)
}

/// Randomly upper- or lower-cases each character.
fn scramble_case(text: &str, mask: &[bool]) -> String {
    text.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn low_ratings_are_always_strong_negative(rating in -1000i64..=2, comment in ".*") {
        let vocab = HedgeVocabulary::canonical();
        prop_assert_eq!(classify(rating, &comment, &vocab), Detection::StrongNegative);
    }

    #[test]
    fn high_rating_with_hedge_is_silent_struggle(
        rating in 4i64..1000,
        prefix in ".{0,20}",
        suffix in ".{0,20}",
        phrase in hedge_phrase(),
        mask in prop::collection::vec(any::<bool>(), 1..16),
    ) {
        let comment = format!("{prefix}{}{suffix}", scramble_case(phrase, &mask));
        let vocab = HedgeVocabulary::canonical();
        prop_assert_eq!(classify(rating, &comment, &vocab), Detection::SilentStruggle);
    }

    #[test]
    fn rating_three_is_clear_opinion(comment in ".*") {
        let vocab = HedgeVocabulary::canonical();
        prop_assert_eq!(classify(3, &comment, &vocab), Detection::ClearOpinion);
    }

    #[test]
    fn high_rating_without_hedge_is_clear_opinion(
        rating in 3i64..1000,
        comment in hedge_free_comment(),
    ) {
        let vocab = HedgeVocabulary::canonical();
        prop_assert_eq!(classify(rating, &comment, &vocab), Detection::ClearOpinion);
    }

    #[test]
    fn classification_is_deterministic(rating in any::<i64>(), comment in ".*") {
        let classifier = Classifier::default();
        let first = classifier.classify(rating, &comment);
        prop_assert_eq!(first, classifier.classify(rating, &comment));
        prop_assert_eq!(first, classifier.explain(rating, &comment).detection);
    }

    #[test]
    fn summary_counts_sum_to_row_count(
        rows in prop::collection::vec((-2i64..8, prop::bool::ANY), 0..40),
    ) {
        let mut csv = String::from("id,rating,comment,date\n");
        for (index, (rating, hedged)) in rows.iter().enumerate() {
            let comment = if *hedged { "it works, I guess" } else { "superb" };
            csv.push_str(&format!("{index},{rating},{comment:?},2024-01-01\n"));
        }

        let annotated = FeedbackTable::from_reader(csv.as_bytes())
            .map_err(|e| TestCaseError::fail(e.to_string()))?
            .annotate(&Classifier::default());
        let summary = annotated.summary();

        prop_assert_eq!(summary.total(), rows.len());
        prop_assert_eq!(annotated.len(), rows.len());
        for detection in Detection::ALL {
            prop_assert_eq!(summary.count(detection), annotated.with_detection(detection).count());
        }
    }
}
