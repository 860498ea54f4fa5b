//! Aggregation: folds section, skill and ATS signals into one completeness score
//! and a consolidated suggestion list.

use crate::analysis::content_quality::ContentQualityResult;
use crate::analysis::sections::SectionResult;
use crate::analysis::skills::DetectedSkill;

const SECTION_WEIGHT: f64 = 0.4;
const SKILL_WEIGHT: f64 = 0.3;
const ATS_WEIGHT: f64 = 0.3;
/// Skill coverage saturates at this many detected skills.
const SKILL_SATURATION: f64 = 15.0;
const MIN_SKILLS: usize = 5;
const ATS_SUGGESTION_THRESHOLD: u32 = 70;

/// completeness = round(100 × (0.4 × sections + 0.3 × skills + 0.3 × ats)), in 0..=100.
pub fn calculate_completeness(sections: &SectionResult, skill_count: usize, ats_score: u32) -> u32 {
    let section_coverage = sections.coverage();
    let skill_coverage = (skill_count as f64 / SKILL_SATURATION).min(1.0);
    let ats_coverage = f64::from(ats_score) / 100.0;

    let weighted =
        section_coverage * SECTION_WEIGHT + skill_coverage * SKILL_WEIGHT + ats_coverage * ATS_WEIGHT;

    (weighted * 100.0).round_ties_even().clamp(0.0, 100.0) as u32
}

/// Builds the suggestion list in fixed precedence order. Duplicates are kept:
/// each entry comes from a distinct rule.
pub fn generate_suggestions(
    sections: &SectionResult,
    skills: &[DetectedSkill],
    ats_score: u32,
    content: &ContentQualityResult,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if sections.is_missing("summary") {
        suggestions
            .push("Add a professional summary section highlighting your key strengths".to_string());
    }
    if sections.is_missing("skills") {
        suggestions.push(
            "Create a dedicated skills section to showcase your technical abilities".to_string(),
        );
    }
    if sections.is_missing("projects") {
        suggestions
            .push("Include a projects section to demonstrate practical experience".to_string());
    }

    if skills.len() < MIN_SKILLS {
        suggestions
            .push("Consider adding more technical skills to strengthen your profile".to_string());
    }

    if ats_score < ATS_SUGGESTION_THRESHOLD {
        suggestions.push("Improve ATS optimization by adding more relevant keywords".to_string());
        suggestions.push("Use bullet points and proper formatting for better ATS parsing".to_string());
    }

    suggestions.extend(content.suggestions.iter().cloned());
    suggestions
}
