pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::profiles::handlers as profiles;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::teammates::handlers as teammates;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles
        .route("/api/v1/profiles", post(profiles::handle_create_profile))
        .route(
            "/api/v1/profiles/:id",
            get(profiles::handle_get_profile).patch(profiles::handle_update_profile),
        )
        .route(
            "/api/v1/profiles/:id/matches",
            get(profiles::handle_profile_matches),
        )
        // Resume extraction
        .route("/api/v1/resume/parse", post(resume::handle_parse_resume))
        .route("/api/v1/resume/preview", post(resume::handle_preview_resume))
        // Teammate discovery
        .route("/api/v1/teammates", get(teammates::handle_list_teammates))
        .route(
            "/api/v1/teammates/search",
            get(teammates::handle_search_teammates),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
