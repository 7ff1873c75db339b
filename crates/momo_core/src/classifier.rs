//! crates/momo_core/src/classifier.rs
//!
//! Keyword heuristics that derive an emotion and topic tags from moment text.

use serde::{Deserialize, Serialize};

use crate::domain::Emotion;

/// The derived attributes of a moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub emotion: Emotion,
    /// Never empty.
    pub tags: Vec<String>,
}

/// Anything that can turn moment text into an emotion and tags.
pub trait MomentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Classification;
}

struct Rule {
    keywords: &'static [&'static str],
    emotion: Emotion,
    tags: &'static [&'static str],
}

// Checked in order; the first rule with any matching keyword wins.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["stress", "deadline"],
        emotion: Emotion::Stressed,
        tags: &["Work", "Pressure"],
    },
    Rule {
        keywords: &["happy", "great"],
        emotion: Emotion::Happy,
        tags: &["Joy", "Wins"],
    },
    Rule {
        keywords: &["tired", "sleep"],
        emotion: Emotion::Tired,
        tags: &["Health", "Sleep"],
    },
    Rule {
        keywords: &["walk", "nature"],
        emotion: Emotion::Calm,
        tags: &["Nature", "Health"],
    },
    Rule {
        keywords: &["code", "hackathon"],
        emotion: Emotion::Excited,
        tags: &["Hackathon", "Dev"],
    },
];

const FALLBACK_TAGS: &[&str] = &["Daily"];

/// Ordered case-insensitive substring rules. No scoring, no combination.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl MomentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Classification {
        let lower = text.to_lowercase();
        let (emotion, tags) = RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
            .map(|rule| (rule.emotion, rule.tags))
            .unwrap_or((Emotion::Neutral, FALLBACK_TAGS));

        Classification {
            emotion,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Classifies with the default keyword rules.
pub fn classify(text: &str) -> Classification {
    KeywordClassifier.classify(text)
}
