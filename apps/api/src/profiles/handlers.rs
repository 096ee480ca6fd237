use std::collections::BTreeSet;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_resume, ResumeFeatures};
use crate::matching::scoring::MatchResult;
use crate::models::profile::{
    normalize_skills, NewProfile, ProfileUpdate, UserProfile, DEFAULT_AVAILABILITY,
};
use crate::resume::upload::{decode_resume, multipart_error, ResumeUpload};
use crate::state::AppState;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Text fields of the signup form plus the optional resume file.
#[derive(Debug, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub bio: String,
    pub availability: String,
    pub skills: String,
    pub resume: Option<ResumeUpload>,
}

impl SignupForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = SignupForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "resume" {
                // browsers send an empty part when no file was chosen
                let upload = ResumeUpload::from_field(field).await?;
                if !upload.bytes.is_empty() {
                    form.resume = Some(upload);
                }
                continue;
            }

            let slot = match name.as_str() {
                "fullName" | "full_name" => &mut form.full_name,
                "email" => &mut form.email,
                "bio" => &mut form.bio,
                "availability" => &mut form.availability,
                "skills" => &mut form.skills,
                _ => {
                    debug!("Ignoring signup field '{name}'");
                    continue;
                }
            };
            *slot = field.text().await.map_err(multipart_error)?;
        }
        Ok(form)
    }

    /// Checks required fields and returns the normalized (trimmed, lower-cased) email.
    pub fn validate(&self) -> Result<String, AppError> {
        if self.full_name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(AppError::Validation(
                "Please provide name and email".to_string(),
            ));
        }
        let email = self.email.trim().to_lowercase();
        if !EMAIL.is_match(&email) {
            return Err(AppError::Validation(
                "Please provide a valid email address".to_string(),
            ));
        }
        Ok(email)
    }

    /// Resume features, when present, replace the manual skill list.
    pub fn into_new_profile(self, email: String, features: Option<ResumeFeatures>) -> NewProfile {
        let availability = match self.availability.trim() {
            "" => DEFAULT_AVAILABILITY.to_string(),
            a => a.to_string(),
        };
        let mut profile = NewProfile {
            full_name: self.full_name.trim().to_string(),
            email,
            bio: self.bio.trim().to_string(),
            availability,
            skills: split_skills(&self.skills),
            ..Default::default()
        };
        if let Some(features) = features {
            profile.skills = features.skills.into_iter().collect();
            profile.github_links = features.github_links;
            profile.projects = features.projects;
            profile.achievements = features.achievements;
        }
        profile
    }
}

/// Comma-separated skills, normalized like every other skill list.
pub fn split_skills(raw: &str) -> Vec<String> {
    normalize_skills(raw.split(','))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMatchesResponse {
    pub user_id: Uuid,
    pub matches: Vec<MatchResult>,
}

/// POST /api/v1/profiles
pub async fn handle_create_profile(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let mut form = SignupForm::from_multipart(multipart).await?;
    let email = form.validate()?;

    let features = match form.resume.take() {
        Some(upload) => {
            let text = decode_resume(upload).await?;
            if text.trim().is_empty() {
                debug!("Uploaded resume has no text; keeping manual skills");
                None
            } else {
                Some(extract_resume(&text)?)
            }
        }
        None => None,
    };

    let profile = state
        .profiles
        .create(form.into_new_profile(email, features))
        .await?;
    info!(user_id = %profile.id, skills = profile.skills.len(), "Profile created");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .profiles
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(profile))
}

/// PATCH /api/v1/profiles/:id
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    if update.is_empty() {
        return Err(AppError::Validation("Nothing to update".to_string()));
    }
    let profile = state
        .profiles
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    info!(user_id = %id, "Profile updated");
    Ok(Json(profile))
}

/// GET /api/v1/profiles/:id/matches
pub async fn handle_profile_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileMatchesResponse>, AppError> {
    let profile = state
        .profiles
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;

    let skills: BTreeSet<String> = profile.skills.iter().cloned().collect();
    let roster = state.profiles.roster_excluding(id).await?;
    let matches = state.scorer.score(&skills, &profile.projects, &roster);

    Ok(Json(ProfileMatchesResponse {
        user_id: id,
        matches,
    }))
}
