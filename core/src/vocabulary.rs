//! Hedge vocabulary
//!
//! Lowercase phrases that signal hesitancy or lukewarm endorsement. Matching
//! is naive substring containment on the lowercased comment, so a phrase
//! also matches inside longer words ("workshop" contains "works").

/// The default hedge phrases, in match-report order.
pub const CANONICAL_HEDGE_PHRASES: &[&str] = &[
    "okay",
    "fine",
    "maybe",
    "guess",
    "not sure",
    "works",
    "alright",
    "sort of",
    "kind of",
    "i think",
    "decent",
    "acceptable",
    "passable",
    "tolerable",
];

/// Immutable set of lowercase hedge phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HedgeVocabulary {
    phrases: Vec<String>,
}

impl Default for HedgeVocabulary {
    fn default() -> Self {
        Self::canonical()
    }
}

impl HedgeVocabulary {
    /// Vocabulary built from [`CANONICAL_HEDGE_PHRASES`].
    pub fn canonical() -> Self {
        Self::new(CANONICAL_HEDGE_PHRASES.iter().copied())
    }

    /// Build a vocabulary from arbitrary phrases.
    ///
    /// Phrases are trimmed and lowercased. Empty phrases are dropped since
    /// the empty string is a substring of every comment. Duplicates keep
    /// their first position.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self {
            phrases: Vec::new(),
        };
        vocab.push_all(phrases);
        vocab
    }

    /// New vocabulary with `extra` phrases appended.
    pub fn with_extra<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = self.clone();
        vocab.push_all(extra);
        vocab
    }

    fn push_all<I, S>(&mut self, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let normalized = phrase.as_ref().trim().to_lowercase();
            if normalized.is_empty() || self.phrases.contains(&normalized) {
                continue;
            }
            self.phrases.push(normalized);
        }
    }

    /// Whether any phrase occurs anywhere in `comment`, ignoring case.
    pub fn contains_hedge(&self, comment: &str) -> bool {
        let comment_lower = comment.to_lowercase();
        self.phrases
            .iter()
            .any(|phrase| comment_lower.contains(phrase.as_str()))
    }

    /// Every phrase that occurs in `comment`, in vocabulary order.
    pub fn matched_phrases(&self, comment: &str) -> Vec<&str> {
        let comment_lower = comment.to_lowercase();
        self.phrases
            .iter()
            .filter(|phrase| comment_lower.contains(phrase.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
