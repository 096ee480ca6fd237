use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS user_profiles (
        id            UUID PRIMARY KEY,
        full_name     TEXT NOT NULL,
        email         TEXT NOT NULL DEFAULT '',
        bio           TEXT NOT NULL DEFAULT '',
        availability  TEXT NOT NULL DEFAULT 'Not specified',
        skills        TEXT[] NOT NULL DEFAULT '{}',
        github_links  TEXT[] NOT NULL DEFAULT '{}',
        projects      JSONB NOT NULL DEFAULT '[]',
        achievements  JSONB NOT NULL DEFAULT '[]',
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at    TIMESTAMPTZ
    )
    "#,
    // profiles created from a bare resume parse have no email yet
    "CREATE UNIQUE INDEX IF NOT EXISTS user_profiles_email_key ON user_profiles (email) WHERE email <> ''",
];

/// Creates the profile table and indexes if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to apply profile schema")?;
    }
    info!("Profile schema ready");
    Ok(())
}
