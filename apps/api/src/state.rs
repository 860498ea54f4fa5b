use std::sync::Arc;

use crate::analysis::KnowledgeBase;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only skill/section/keyword tables, built once at startup.
    pub knowledge_base: Arc<KnowledgeBase>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            knowledge_base: Arc::new(KnowledgeBase::builtin()),
        }
    }
}
