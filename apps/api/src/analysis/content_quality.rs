//! Content quality heuristics: length, action verbs, numbers, keyword density.
//!
//! Each triggered check pushes one issue and one matching suggestion, in check order.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::keyword_density::{analyze_keyword_density, word_count};
use crate::analysis::knowledge_base::KnowledgeBase;

const MIN_WORDS: usize = 200;
const MAX_WORDS: usize = 800;
const MIN_ACTION_VERBS: usize = 3;
const MIN_NUMBERS: usize = 2;
const MIN_AVG_KEYWORD_DENSITY: f64 = 1.0;

const ACTION_VERBS: &[&str] = &[
    "achieved",
    "developed",
    "created",
    "managed",
    "led",
    "implemented",
    "designed",
    "built",
    "improved",
    "increased",
    "reduced",
    "optimized",
];

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentQualityResult {
    pub word_count: usize,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    /// How many of the action verbs appear at least once (plain substring).
    pub action_verb_count: usize,
    pub number_count: usize,
    /// Mean density across the job-category keyword sets.
    pub keyword_density: f64,
}

impl ContentQualityResult {
    fn flag(&mut self, issue: &str, suggestion: &str) {
        self.issues.push(issue.to_string());
        self.suggestions.push(suggestion.to_string());
    }
}

pub fn analyze_content_quality(text: &str, kb: &KnowledgeBase) -> ContentQualityResult {
    let text_lower = text.to_lowercase();
    let word_count = word_count(&text_lower);

    let action_verb_count = ACTION_VERBS
        .iter()
        .filter(|verb| text_lower.contains(*verb))
        .count();
    let number_count = NUMBER.find_iter(&text_lower).count();
    let keyword_density = analyze_keyword_density(text, &kb.job_categories).average_density();

    let mut result = ContentQualityResult {
        word_count,
        issues: Vec::new(),
        suggestions: Vec::new(),
        action_verb_count,
        number_count,
        keyword_density,
    };

    if word_count < MIN_WORDS {
        result.flag(
            "Resume is too short",
            "Add more details about your experience and achievements",
        );
    } else if word_count > MAX_WORDS {
        result.flag(
            "Resume might be too long",
            "Consider condensing content to 1-2 pages",
        );
    }

    if action_verb_count < MIN_ACTION_VERBS {
        result.flag(
            "Limited use of action verbs",
            "Use more strong action verbs to describe your achievements",
        );
    }

    if number_count < MIN_NUMBERS {
        result.flag(
            "Limited quantifiable achievements",
            "Add specific numbers, percentages, or metrics to your achievements",
        );
    }

    if keyword_density < MIN_AVG_KEYWORD_DENSITY {
        result.flag(
            "Low keyword density",
            "Include more industry-relevant keywords",
        );
    }

    result
}
