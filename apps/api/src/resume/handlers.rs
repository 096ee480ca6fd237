use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_resume, ResumeFeatures};
use crate::matching::scoring::MatchResult;
use crate::resume::upload::{decode_resume, multipart_error, ResumeUpload};
use crate::state::AppState;

const TEXT_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeResponse {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub features: ResumeFeatures,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePreviewResponse {
    pub file_name: Option<String>,
    pub text_length: usize,
    pub text_preview: String,
    #[serde(flatten)]
    pub features: ResumeFeatures,
}

/// POST /api/v1/resume/parse
/// Extracts features, stores them on the user's profile and ranks everyone else.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(req): Json<ParseResumeRequest>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let features = extract_resume(&req.text)?;
    let profile = state
        .profiles
        .save_features(req.user_id, req.name.as_deref(), &features)
        .await?;

    let roster = state.profiles.roster_excluding(profile.id).await?;
    let matches = state
        .scorer
        .score(&features.skills, &features.projects, &roster);
    info!(
        user_id = %profile.id,
        skills = features.skills.len(),
        projects = features.projects.len(),
        matches = matches.len(),
        "Resume parsed"
    );

    Ok(Json(ParseResumeResponse {
        user_id: profile.id,
        features,
        matches,
    }))
}

/// POST /api/v1/resume/preview
/// Decodes and extracts an uploaded resume without storing anything.
pub async fn handle_preview_resume(
    mut multipart: Multipart,
) -> Result<Json<ResumePreviewResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("resume") {
            upload = Some(ResumeUpload::from_field(field).await?);
            break;
        }
    }
    let upload = upload.ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;

    let file_name = upload.file_name.clone();
    let text = decode_resume(upload).await?;
    let features = extract_resume(&text)?;

    Ok(Json(ResumePreviewResponse {
        file_name,
        text_length: text.chars().count(),
        text_preview: text.chars().take(TEXT_PREVIEW_CHARS).collect(),
        features,
    }))
}
