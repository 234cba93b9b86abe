use std::sync::Arc;

use crate::ats::{AtsScorer, KeywordAtsScorer};
use crate::config::Config;
use crate::layout::LayoutProfile;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page size and reference font every style solve uses. Fixed at startup
    /// so the same content always gets the same StyleConfig.
    pub profile: LayoutProfile,
    /// Pluggable ATS scorer. Default: KeywordAtsScorer.
    pub ats_scorer: Arc<dyn AtsScorer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            profile: config.layout_profile(),
            config,
            ats_scorer: Arc::new(KeywordAtsScorer),
        }
    }
}
