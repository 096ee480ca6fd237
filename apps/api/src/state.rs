use std::sync::Arc;

use crate::config::Config;
use crate::matching::scoring::MatchScorer;
use crate::profiles::repository::ProfileRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL or in-memory, chosen at startup.
    pub profiles: Arc<dyn ProfileRepository>,
    /// Pluggable match scorer. Default: SharedFeatureScorer.
    pub scorer: Arc<dyn MatchScorer>,
    pub config: Config,
}
