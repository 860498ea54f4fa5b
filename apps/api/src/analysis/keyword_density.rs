//! Keyword density: how often each keyword set's variants occur, as a share of all words.
//!
//! Variants are counted with whole-word matches; words are counted by whitespace split.

use serde::{Deserialize, Serialize, Serializer};

use crate::analysis::knowledge_base::KeywordSet;
use crate::analysis::skills::round2;

const MAX_KEYWORD_SCORE: f64 = 100.0;
const SCORE_PER_DENSITY_POINT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeywordStats {
    pub count: usize,
    /// Percent of total words, rounded to 2 decimals.
    pub density: f64,
    /// min(density × 10, 100), from the unrounded density.
    pub score: f64,
}

/// Per-category keyword statistics in keyword-table order.
/// Serializes as a JSON object keyed by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordDensityReport {
    entries: Vec<(String, KeywordStats)>,
}

impl KeywordDensityReport {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeywordStats)> {
        self.entries.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean of the rounded densities; 0 when there are no categories.
    pub fn average_density(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let total: f64 = self.entries.iter().map(|(_, s)| s.density).sum();
        total / self.len() as f64
    }
}

impl Serialize for KeywordDensityReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Number of whitespace-separated words. The ASCII information separators
/// U+001C..=U+001F also split words.
pub fn word_count(text: &str) -> usize {
    text.split(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
        .filter(|word| !word.is_empty())
        .count()
}

pub fn analyze_keyword_density(text: &str, keyword_sets: &[KeywordSet]) -> KeywordDensityReport {
    let text_lower = text.to_lowercase();
    let word_count = word_count(&text_lower);

    let entries = keyword_sets
        .iter()
        .map(|set| {
            let count: usize = set
                .variants
                .iter()
                .map(|variant| variant.count_words(&text_lower))
                .sum();

            let density = if word_count > 0 {
                count as f64 / word_count as f64 * 100.0
            } else {
                0.0
            };

            let stats = KeywordStats {
                count,
                density: round2(density),
                score: (density * SCORE_PER_DENSITY_POINT).min(MAX_KEYWORD_SCORE),
            };
            (set.name.clone(), stats)
        })
        .collect();

    KeywordDensityReport { entries }
}
