use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ResumeFeatures;
use crate::models::profile::{NewProfile, ProfileUpdate, UserProfile};
use crate::teammates::search::{Page, TeammateFilter};

/// Name given to profiles created from a resume parse without a name.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Profile store. Implemented by `PgProfileRepository` and
/// `InMemoryProfileRepository`; carried in `AppState` as
/// `Arc<dyn ProfileRepository>`.
///
/// Listing order is creation order for every backend.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Short backend label reported by `/health`.
    fn backend(&self) -> &'static str;

    /// Inserts a new profile. A non-empty email already on file is a `Conflict`.
    async fn create(&self, profile: NewProfile) -> Result<UserProfile, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<UserProfile>, AppError>;

    async fn update(&self, id: Uuid, update: &ProfileUpdate)
        -> Result<Option<UserProfile>, AppError>;

    /// Replaces the extracted feature fields of `id`, creating the profile
    /// when it does not exist. A blank `name` keeps the stored name.
    async fn save_features(
        &self,
        id: Uuid,
        name: Option<&str>,
        features: &ResumeFeatures,
    ) -> Result<UserProfile, AppError>;

    /// Every stored profile except `id`: the roster for match scoring.
    async fn roster_excluding(&self, id: Uuid) -> Result<Vec<UserProfile>, AppError>;

    async fn search(&self, filter: &TeammateFilter) -> Result<Vec<UserProfile>, AppError>;

    /// One page of filtered profiles plus the total filtered count.
    async fn list(
        &self,
        filter: &TeammateFilter,
        page: Page,
    ) -> Result<(Vec<UserProfile>, u64), AppError>;
}

pub(crate) fn duplicate_email(email: &str) -> AppError {
    AppError::Conflict(format!("A profile with email {email} already exists"))
}
