//! Skill extraction: scores every knowledge-base skill against the resume text.
//!
//! Per variant, exactly one tier fires:
//! - whole-word match → +0.8
//! - substring match (e.g. inside a longer word) → +0.4
//!
//! Confidence accumulates across a skill's variants; skills above 0.3 are reported.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::knowledge_base::KnowledgeBase;

const WORD_MATCH_WEIGHT: f64 = 0.8;
const SUBSTRING_MATCH_WEIGHT: f64 = 0.4;
const DETECTION_THRESHOLD: f64 = 0.3;
const TOP_WORDS_LIMIT: usize = 20;

static WORD_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSkill {
    pub skill: String,
    pub category: String,
    /// Unnormalized, rounded to 2 decimals.
    pub confidence: f64,
    pub matches: Vec<String>,
    pub variations_found: usize,
}

/// Names-only view of the detected skills, for consumers that don't need confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub skills_found: Vec<String>,
    pub top_words: Vec<(String, usize)>,
}

/// Extracts skills from raw text, sorted by descending confidence.
/// Ties keep knowledge-base order.
pub fn extract_skills(text: &str, kb: &KnowledgeBase) -> Vec<DetectedSkill> {
    let text_lower = text.to_lowercase();
    let mut detected = Vec::new();

    for category in &kb.skill_categories {
        for skill in &category.skills {
            let mut confidence = 0.0_f64;
            let mut matches = Vec::new();

            for variant in &skill.variants {
                if variant.matches_word(&text_lower) {
                    confidence += WORD_MATCH_WEIGHT;
                    matches.push(variant.text.clone());
                } else if text_lower.contains(variant.text.as_str()) {
                    confidence += SUBSTRING_MATCH_WEIGHT;
                    matches.push(variant.text.clone());
                }
            }

            if confidence > DETECTION_THRESHOLD {
                detected.push(DetectedSkill {
                    skill: skill.name.clone(),
                    category: category.name.clone(),
                    confidence: round2(confidence),
                    variations_found: matches.len(),
                    matches,
                });
            }
        }
    }

    // sort_by is stable, so equal confidences stay in table order
    detected.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    detected
}

/// Reduces a skill list to names and attaches the most frequent words of the text.
pub fn summarize_skills(text: &str, skills: &[DetectedSkill]) -> SkillSummary {
    SkillSummary {
        skills_found: skills.iter().map(|s| s.skill.clone()).collect(),
        top_words: top_words(text, TOP_WORDS_LIMIT),
    }
}

/// Most common `\w+` tokens of the lower-cased text; ties go to the earlier first occurrence.
pub fn top_words(text: &str, limit: usize) -> Vec<(String, usize)> {
    let text_lower = text.to_lowercase();
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (position, token) in WORD_TOKEN.find_iter(&text_lower).enumerate() {
        counts.entry(token.as_str()).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first_seen))| (word, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, count, _)| (word.to_string(), count))
        .collect()
}

/// Two-decimal rounding; exact halves go to the even neighbour (3.125 → 3.12).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
