use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ResumeFeatures;
use crate::models::profile::{NewProfile, ProfileUpdate, UserProfile, DEFAULT_AVAILABILITY};
use crate::profiles::repository::{duplicate_email, ProfileRepository, ANONYMOUS_NAME};
use crate::teammates::search::{Page, TeammateFilter};

/// Process-local profile store used when no database is configured.
/// Profiles are kept in insertion order.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<Vec<UserProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        InMemoryProfileRepository {
            profiles: RwLock::new(profiles),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, profile: NewProfile) -> Result<UserProfile, AppError> {
        let mut profiles = self.profiles.write().await;
        if !profile.email.is_empty()
            && profiles
                .iter()
                .any(|p| p.email.eq_ignore_ascii_case(&profile.email))
        {
            return Err(duplicate_email(&profile.email));
        }
        let created = profile.into_profile(Uuid::new_v4());
        profiles.push(created.clone());
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<UserProfile>, AppError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.iter_mut().find(|p| p.id == id).map(|p| {
            update.apply(p);
            p.clone()
        }))
    }

    async fn save_features(
        &self,
        id: Uuid,
        name: Option<&str>,
        features: &ResumeFeatures,
    ) -> Result<UserProfile, AppError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let mut profiles = self.profiles.write().await;

        let index = match profiles.iter().position(|p| p.id == id) {
            Some(index) => index,
            None => {
                let fresh = NewProfile {
                    full_name: ANONYMOUS_NAME.to_string(),
                    availability: DEFAULT_AVAILABILITY.to_string(),
                    ..Default::default()
                }
                .into_profile(id);
                profiles.push(fresh);
                profiles.len() - 1
            }
        };

        let profile = &mut profiles[index];
        if let Some(name) = name {
            profile.full_name = name.to_string();
        }
        profile.skills = features.skills.iter().cloned().collect();
        profile.github_links = features.github_links.clone();
        profile.projects = features.projects.clone();
        profile.achievements = features.achievements.clone();
        profile.updated_at = Some(Utc::now());
        Ok(profile.clone())
    }

    async fn roster_excluding(&self, id: Uuid) -> Result<Vec<UserProfile>, AppError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().filter(|p| p.id != id).cloned().collect())
    }

    async fn search(&self, filter: &TeammateFilter) -> Result<Vec<UserProfile>, AppError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn list(
        &self,
        filter: &TeammateFilter,
        page: Page,
    ) -> Result<(Vec<UserProfile>, u64), AppError> {
        let profiles = self.profiles.read().await;
        let matching: Vec<&UserProfile> = profiles.iter().filter(|p| filter.matches(p)).collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Project;

    fn new_profile(name: &str, email: &str, skills: &[&str]) -> NewProfile {
        NewProfile {
            full_name: name.to_string(),
            email: email.to_string(),
            availability: "Full-time".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = InMemoryProfileRepository::new();
        repo.create(new_profile("Ada", "ada@example.com", &[]))
            .await
            .unwrap();
        let err = repo
            .create(new_profile("Ada Again", "ADA@example.com", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_blank_emails_never_conflict() {
        let repo = InMemoryProfileRepository::new();
        repo.create(new_profile("A", "", &[])).await.unwrap();
        repo.create(new_profile("B", "", &[])).await.unwrap();
        assert_eq!(repo.search(&TeammateFilter::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_profile_returns_none() {
        let repo = InMemoryProfileRepository::new();
        let result = repo
            .update(Uuid::new_v4(), &ProfileUpdate::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_save_features_creates_then_replaces() {
        let repo = InMemoryProfileRepository::new();
        let id = Uuid::new_v4();
        let mut features = ResumeFeatures::default();
        features.skills.insert("Rust".to_string());

        let created = repo.save_features(id, None, &features).await.unwrap();
        assert_eq!(created.full_name, ANONYMOUS_NAME);
        assert_eq!(created.email, "");
        assert_eq!(created.skills, vec!["Rust"]);

        features.skills.clear();
        features.projects.push(Project {
            name: "Chat App".to_string(),
            ..Default::default()
        });
        let saved = repo
            .save_features(id, Some("Jane Doe"), &features)
            .await
            .unwrap();
        assert_eq!(saved.id, id);
        assert_eq!(saved.full_name, "Jane Doe");
        assert!(saved.skills.is_empty());
        assert_eq!(saved.projects.len(), 1);
        assert_eq!(repo.roster_excluding(Uuid::new_v4()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_roster_excludes_requester() {
        let repo = InMemoryProfileRepository::new();
        let me = repo.create(new_profile("Me", "me@example.com", &[])).await.unwrap();
        repo.create(new_profile("You", "you@example.com", &[])).await.unwrap();
        let roster = repo.roster_excluding(me.id).await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].full_name, "You");
    }

    #[tokio::test]
    async fn test_list_paginates_filtered_profiles() {
        let repo = InMemoryProfileRepository::new();
        for i in 0..5 {
            repo.create(new_profile(&format!("Dev {i}"), "", &["Python"]))
                .await
                .unwrap();
        }
        repo.create(new_profile("Designer", "", &["Figma"])).await.unwrap();

        let filter = TeammateFilter::new(Some("python"), None);
        let (items, total) = repo.list(&filter, Page::new(Some(2), Some(2))).await.unwrap();
        assert_eq!(total, 5);
        let names: Vec<_> = items.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["Dev 2", "Dev 3"]);
    }
}
