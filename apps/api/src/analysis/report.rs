//! Analysis pipeline: runs every analyzer over the same text and assembles the report.
//!
//! Flow: text → {skills, sections, ATS, keyword density, content quality} → aggregator.
//! The analyzers share nothing but the read-only knowledge base, so `analyze` is a pure
//! function of its input.

use serde::Serialize;
use tracing::debug;

use crate::analysis::aggregator::{calculate_completeness, generate_suggestions};
use crate::analysis::ats::{score_ats, AtsChecks};
use crate::analysis::content_quality::{analyze_content_quality, ContentQualityResult};
use crate::analysis::keyword_density::{analyze_keyword_density, KeywordDensityReport};
use crate::analysis::knowledge_base::KnowledgeBase;
use crate::analysis::sections::detect_sections;
use crate::analysis::skills::{extract_skills, summarize_skills, DetectedSkill, SkillSummary};

/// Full structured output of one resume analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub detected_skills: Vec<DetectedSkill>,
    pub found_sections: Vec<String>,
    pub missing_sections: Vec<String>,
    pub ats_score: u32,
    pub ats_checks: AtsChecks,
    pub keyword_density: KeywordDensityReport,
    pub content_quality: ContentQualityResult,
    pub completeness_score: u32,
    pub suggestions: Vec<String>,
}

impl AnalysisReport {
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.detected_skills.iter().map(|s| s.skill.as_str())
    }

    /// Names-only projection for consumers that don't need confidence scores.
    pub fn skill_summary(&self, text: &str) -> SkillSummary {
        summarize_skills(text, &self.detected_skills)
    }
}

/// Analyzes raw resume text. Never fails: empty text yields an empty, zero-scored report.
pub fn analyze(text: &str, kb: &KnowledgeBase) -> AnalysisReport {
    let detected_skills = extract_skills(text, kb);
    let sections = detect_sections(text, kb);
    let ats = score_ats(text);
    let keyword_density = analyze_keyword_density(text, &kb.job_categories);
    let content_quality = analyze_content_quality(text, kb);

    let completeness_score = calculate_completeness(&sections, detected_skills.len(), ats.score);
    let suggestions = generate_suggestions(&sections, &detected_skills, ats.score, &content_quality);

    debug!(
        skills = detected_skills.len(),
        sections_found = sections.found_sections.len(),
        ats_score = ats.score,
        completeness = completeness_score,
        "Resume analysis complete"
    );

    AnalysisReport {
        detected_skills,
        found_sections: sections.found_sections,
        missing_sections: sections.missing_sections,
        ats_score: ats.score,
        ats_checks: ats.checks,
        keyword_density,
        content_quality,
        completeness_score,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str =
        "Developed a Python Flask application, improved performance by 20%, led a team of 5.";

    // A reasonably complete resume used across tests.
    const FULL_RESUME: &str = r#"
        Jane Doe | Contact: jane@example.com | Phone: 555-0100 | LinkedIn: /in/janedoe

        Professional Summary
        Software engineer with 8 years of development experience in Python, Java and Go.

        Experience
        • Developed a Django REST platform serving 2M users; reduced latency by 40%.
        • Led a team of 6 engineers using Agile and Scrum; managed 3 product launches.
        • Implemented CI/CD with Jenkins, Docker and Kubernetes on AWS, saving $120k yearly.
        • Designed data analysis pipelines with Pandas, NumPy and SQL (PostgreSQL, MongoDB).

        Projects
        1. Built a React + Redux dashboard for machine learning model monitoring (TensorFlow).
        2. Optimized Terraform modules for GCP and Azure deployments, 3x faster rollouts.

        Skills
        Python, Java, JavaScript, Go, Rust, React, Django, Flask, AWS, Docker, Kubernetes,
        Terraform, SQL, TensorFlow, PyTorch, leadership, communication, problem solving.

        Education
        B.S. Computer Science, State University, 2015

        Certifications
        AWS Certified Solutions Architect
    "#;

    #[test]
    fn test_empty_text_report() {
        let kb = KnowledgeBase::builtin();
        let report = analyze("", &kb);
        assert!(report.detected_skills.is_empty());
        assert!(report.found_sections.is_empty());
        assert_eq!(report.missing_sections.len(), kb.sections.len());
        assert_eq!(report.ats_score, 0);
        assert_eq!(report.ats_checks, AtsChecks::default());
        assert_eq!(report.completeness_score, 0);
        for (_, stats) in report.keyword_density.iter() {
            assert_eq!(stats.density, 0.0);
        }
    }

    #[test]
    fn test_empty_text_suggestions() {
        let kb = KnowledgeBase::builtin();
        let report = analyze("", &kb);
        // 3 section + 1 skill + 2 ATS + 4 content quality
        assert_eq!(report.suggestions.len(), 10);
        assert_eq!(
            report.suggestions[0],
            "Add a professional summary section highlighting your key strengths"
        );
        assert_eq!(
            report.suggestions.last().unwrap(),
            "Include more industry-relevant keywords"
        );
    }

    #[test]
    fn test_scenario_sentence() {
        let kb = KnowledgeBase::builtin();
        let report = analyze(SCENARIO, &kb);

        assert!(report.content_quality.action_verb_count >= 2);
        assert!(report.content_quality.number_count >= 2);

        let python = report
            .detected_skills
            .iter()
            .find(|s| s.skill == "python")
            .unwrap();
        assert!(python.confidence >= 0.8);
        assert!(report.skill_names().any(|s| s == "flask"));
    }

    #[test]
    fn test_only_education_section() {
        let kb = KnowledgeBase::builtin();
        let report = analyze("education", &kb);
        assert_eq!(report.found_sections, vec!["education"]);
        assert_eq!(report.missing_sections.len(), kb.sections.len() - 1);
    }

    #[test]
    fn test_idempotent() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(analyze(FULL_RESUME, &kb), analyze(FULL_RESUME, &kb));
        let a = serde_json::to_string(&analyze(FULL_RESUME, &kb)).unwrap();
        let b = serde_json::to_string(&analyze(FULL_RESUME, &kb)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_resume_scores_well() {
        let kb = KnowledgeBase::builtin();
        let report = analyze(FULL_RESUME, &kb);

        assert_eq!(report.ats_score, 100);
        assert!(report.missing_sections.is_empty(), "{:?}", report.missing_sections);
        assert!(report.detected_skills.len() >= 15);
        assert_eq!(report.completeness_score, 100);
        assert!(!report
            .suggestions
            .iter()
            .any(|s| s.contains("professional summary")));
    }

    #[test]
    fn test_score_invariants() {
        let kb = KnowledgeBase::builtin();
        for text in ["", SCENARIO, FULL_RESUME, "education", "💼 ✨ 日本語 résumé"] {
            let report = analyze(text, &kb);
            assert!(report.ats_score <= 100);
            assert!(report.completeness_score <= 100);
            assert_eq!(
                report.found_sections.len() + report.missing_sections.len(),
                kb.sections.len()
            );
            for pair in report.detected_skills.windows(2) {
                assert!(pair[0].confidence >= pair[1].confidence);
            }
            for skill in &report.detected_skills {
                assert!(skill.confidence > 0.3);
            }
            let mut names: Vec<&str> = report.skill_names().collect();
            let count = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), count);
        }
    }

    #[test]
    fn test_report_serializes_expected_fields() {
        let kb = KnowledgeBase::builtin();
        let value = serde_json::to_value(analyze(SCENARIO, &kb)).unwrap();
        for key in [
            "detected_skills",
            "found_sections",
            "missing_sections",
            "ats_score",
            "ats_checks",
            "keyword_density",
            "content_quality",
            "completeness_score",
            "suggestions",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value["keyword_density"]["software engineer"]["count"].is_u64());
    }

    #[test]
    fn test_skill_summary_projection() {
        let kb = KnowledgeBase::builtin();
        let report = analyze(SCENARIO, &kb);
        let summary = report.skill_summary(SCENARIO);
        assert_eq!(summary.skills_found.len(), report.detected_skills.len());
        assert!(summary.top_words.len() <= 20);
    }
}
