use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ResumeFeatures;
use crate::models::profile::{NewProfile, ProfileRow, ProfileUpdate, UserProfile};
use crate::profiles::repository::{duplicate_email, ProfileRepository, ANONYMOUS_NAME};
use crate::teammates::search::{Page, TeammateFilter};

/// `$1` is the escaped ILIKE skill pattern, `$2` the availability.
const FILTER_CLAUSE: &str = r#"
    ($1::text IS NULL OR EXISTS (
        SELECT 1 FROM unnest(skills) AS skill WHERE skill ILIKE $1
    ))
    AND ($2::text IS NULL OR lower(availability) = lower($2))
"#;

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        PgProfileRepository { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, profile: NewProfile) -> Result<UserProfile, AppError> {
        let email = profile.email.clone();
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO user_profiles
                (id, full_name, email, bio, availability, skills, github_links, projects, achievements)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(&profile.bio)
        .bind(&profile.availability)
        .bind(&profile.skills)
        .bind(&profile.github_links)
        .bind(Json(&profile.projects))
        .bind(Json(&profile.achievements))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => duplicate_email(&email),
            other => AppError::Database(other),
        })?;
        Ok(row.into())
    }

    async fn get(&self, id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM user_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<UserProfile>, AppError> {
        let skills = update.skills();
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE user_profiles SET
                full_name    = COALESCE($2, full_name),
                bio          = COALESCE($3, bio),
                skills       = COALESCE($4, skills),
                availability = COALESCE($5, availability),
                updated_at   = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.full_name())
        .bind(update.bio.as_deref())
        .bind(skills.as_deref())
        .bind(update.availability())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn save_features(
        &self,
        id: Uuid,
        name: Option<&str>,
        features: &ResumeFeatures,
    ) -> Result<UserProfile, AppError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let skills: Vec<String> = features.skills.iter().cloned().collect();

        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO user_profiles
                (id, full_name, skills, github_links, projects, achievements)
            VALUES ($1, COALESCE($2, $7), $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                full_name    = COALESCE($2, user_profiles.full_name),
                skills       = EXCLUDED.skills,
                github_links = EXCLUDED.github_links,
                projects     = EXCLUDED.projects,
                achievements = EXCLUDED.achievements,
                updated_at   = now()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(&skills)
        .bind(&features.github_links)
        .bind(Json(&features.projects))
        .bind(Json(&features.achievements))
        .bind(ANONYMOUS_NAME)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn roster_excluding(&self, id: Uuid) -> Result<Vec<UserProfile>, AppError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT * FROM user_profiles WHERE id <> $1 ORDER BY created_at, id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn search(&self, filter: &TeammateFilter) -> Result<Vec<UserProfile>, AppError> {
        let sql = format!("SELECT * FROM user_profiles WHERE {FILTER_CLAUSE} ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(filter.skill_pattern())
            .bind(filter.availability.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list(
        &self,
        filter: &TeammateFilter,
        page: Page,
    ) -> Result<(Vec<UserProfile>, u64), AppError> {
        let pattern = filter.skill_pattern();

        let count_sql = format!("SELECT COUNT(*) FROM user_profiles WHERE {FILTER_CLAUSE}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(pattern.as_deref())
            .bind(filter.availability.as_deref())
            .fetch_one(&self.pool)
            .await?;

        let page_sql = format!(
            "SELECT * FROM user_profiles WHERE {FILTER_CLAUSE} ORDER BY created_at, id LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, ProfileRow>(&page_sql)
            .bind(pattern.as_deref())
            .bind(filter.availability.as_deref())
            .bind(i64::from(page.limit))
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total.max(0) as u64))
    }
}
