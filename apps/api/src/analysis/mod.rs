// Resume analysis engine.
// Implements: skill extraction, section detection, ATS scoring, keyword density,
// content quality heuristics, and the completeness/suggestion aggregation.
// Pure and synchronous; callers on the async runtime wrap `analyze` in spawn_blocking.

pub mod aggregator;
pub mod ats;
pub mod content_quality;
pub mod handlers;
pub mod keyword_density;
pub mod knowledge_base;
pub mod report;
pub mod sections;
pub mod skills;

// Re-export the public API consumed by handlers and rendering.
pub use knowledge_base::KnowledgeBase;
pub use report::{analyze, AnalysisReport};
