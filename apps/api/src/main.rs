mod config;
mod db;
mod errors;
mod extraction;
mod matching;
mod models;
mod profiles;
mod resume;
mod routes;
mod state;
mod teammates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::matching::scoring::SharedFeatureScorer;
use crate::profiles::memory::InMemoryProfileRepository;
use crate::profiles::postgres::PgProfileRepository;
use crate::profiles::repository::ProfileRepository;
use crate::profiles::seed::sample_profiles;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TeamUp API v{}", env!("CARGO_PKG_VERSION"));

    let profiles = open_profile_store(&config).await;
    info!("Profile store: {}", profiles.backend());

    let state = AppState {
        profiles,
        scorer: Arc::new(SharedFeatureScorer),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// PostgreSQL when `DATABASE_URL` is set and reachable, in-memory otherwise.
async fn open_profile_store(config: &Config) -> Arc<dyn ProfileRepository> {
    if let Some(url) = &config.database_url {
        match create_pool(url).await {
            Ok(pool) => match ensure_schema(&pool).await {
                Ok(()) => return Arc::new(PgProfileRepository::new(pool)),
                Err(e) => warn!("Schema setup failed, falling back to in-memory store: {e:#}"),
            },
            Err(e) => warn!("PostgreSQL unavailable, falling back to in-memory store: {e:#}"),
        }
    } else {
        info!("DATABASE_URL not set; using in-memory store");
    }

    if config.seed_sample_profiles {
        let samples = sample_profiles();
        info!("Seeding {} sample teammates", samples.len());
        Arc::new(InMemoryProfileRepository::with_profiles(samples))
    } else {
        Arc::new(InMemoryProfileRepository::new())
    }
}
