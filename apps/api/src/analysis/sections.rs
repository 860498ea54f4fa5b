//! Section detection: a section counts as present if any of its synonyms appears
//! anywhere in the text. No word boundaries: headers are short and vary a lot.

use serde::{Deserialize, Serialize};

use crate::analysis::knowledge_base::KnowledgeBase;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    pub found_sections: Vec<String>,
    pub missing_sections: Vec<String>,
}

impl SectionResult {
    pub fn is_missing(&self, section: &str) -> bool {
        self.missing_sections.iter().any(|s| s == section)
    }

    /// Fraction of the table's sections that were found.
    pub fn coverage(&self) -> f64 {
        let total = self.found_sections.len() + self.missing_sections.len();
        if total == 0 {
            return 0.0;
        }
        self.found_sections.len() as f64 / total as f64
    }
}

/// Partitions the knowledge-base sections into found and missing, both in table order.
pub fn detect_sections(text: &str, kb: &KnowledgeBase) -> SectionResult {
    let text_lower = text.to_lowercase();
    let mut result = SectionResult::default();

    for section in &kb.sections {
        let found = section
            .synonyms
            .iter()
            .any(|synonym| text_lower.contains(synonym.as_str()));

        if found {
            result.found_sections.push(section.name.clone());
        } else {
            result.missing_sections.push(section.name.clone());
        }
    }

    result
}
