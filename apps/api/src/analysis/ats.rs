//! ATS scoring: eight independent regex checks over the lower-cased text.
//!
//! score = round(passed / 8 × 100), half-to-even.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).expect("valid regex"));
    };
}

pattern!(CONTACT, r"(email|phone|address|linkedin)");
pattern!(SUMMARY, r"(summary|profile|objective)");
pattern!(SKILLS_SECTION, r"(skills|technical|technologies)");
pattern!(EXPERIENCE, r"(experience|work|employment)");
pattern!(EDUCATION, r"(education|degree|university)");
pattern!(QUANTIFIABLE, r"(\d+%|\$\d+|\d+\+|\d+x)");
pattern!(ACTION_VERBS, r"(developed|created|managed|led|implemented|achieved)");
pattern!(FORMATTING, r"(•|\*|\d+\.)");

/// Outcome of each ATS check. Field order is the serialized order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsChecks {
    pub has_contact_info: bool,
    pub has_summary: bool,
    pub has_skills_section: bool,
    pub has_experience: bool,
    pub has_education: bool,
    pub has_quantifiable_results: bool,
    pub has_action_verbs: bool,
    pub proper_formatting: bool,
}

impl AtsChecks {
    pub const COUNT: usize = 8;

    fn as_array(&self) -> [bool; Self::COUNT] {
        [
            self.has_contact_info,
            self.has_summary,
            self.has_skills_section,
            self.has_experience,
            self.has_education,
            self.has_quantifiable_results,
            self.has_action_verbs,
            self.proper_formatting,
        ]
    }

    pub fn passed(&self) -> usize {
        self.as_array().iter().filter(|&&passed| passed).count()
    }

    /// Integer score in 0..=100.
    pub fn score(&self) -> u32 {
        let ratio = self.passed() as f64 / Self::COUNT as f64;
        (ratio * 100.0).round_ties_even().clamp(0.0, 100.0) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtsResult {
    pub score: u32,
    pub checks: AtsChecks,
}

pub fn score_ats(text: &str) -> AtsResult {
    let text_lower = text.to_lowercase();
    let t = text_lower.as_str();

    let checks = AtsChecks {
        has_contact_info: CONTACT.is_match(t),
        has_summary: SUMMARY.is_match(t),
        has_skills_section: SKILLS_SECTION.is_match(t),
        has_experience: EXPERIENCE.is_match(t),
        has_education: EDUCATION.is_match(t),
        has_quantifiable_results: QUANTIFIABLE.is_match(t),
        has_action_verbs: ACTION_VERBS.is_match(t),
        proper_formatting: FORMATTING.is_match(t),
    };

    AtsResult {
        score: checks.score(),
        checks,
    }
}
