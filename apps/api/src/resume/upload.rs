use axum::extract::multipart::{Field, MultipartError};
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// A resume file received as a multipart field.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    PlainText,
}

impl ResumeFormat {
    /// Content type wins; the file extension is consulted when the client
    /// sent none or a generic `application/octet-stream`.
    pub fn detect(upload: &ResumeUpload) -> Option<Self> {
        let content_type = upload
            .content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase());
        match content_type.as_deref() {
            Some("application/pdf") => return Some(ResumeFormat::Pdf),
            Some(ct) if ct.starts_with("text/") => return Some(ResumeFormat::PlainText),
            Some(ct) if ct != "application/octet-stream" => return None,
            _ => {}
        }

        let extension = upload
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Some(ResumeFormat::Pdf),
            Some("txt") | Some("md") => Some(ResumeFormat::PlainText),
            _ => None,
        }
    }
}

impl ResumeUpload {
    pub async fn from_field(field: Field<'_>) -> Result<Self, AppError> {
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
        Ok(ResumeUpload {
            file_name,
            content_type,
            bytes,
        })
    }
}

pub fn multipart_error(e: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
}

/// Decodes an uploaded resume to plain text.
///
/// PDF parsing is CPU-bound and runs on the blocking pool.
pub async fn decode_resume(upload: ResumeUpload) -> Result<String, AppError> {
    let format = ResumeFormat::detect(&upload).ok_or_else(|| {
        AppError::UnsupportedMedia(format!(
            "Unsupported resume format {}; upload a PDF or plain-text file",
            upload.content_type.as_deref().unwrap_or("(unknown)")
        ))
    })?;
    debug!("Decoding {} byte resume as {format:?}", upload.bytes.len());

    match format {
        ResumeFormat::PlainText => String::from_utf8(upload.bytes.to_vec())
            .map_err(|_| AppError::UnprocessableEntity("Resume text is not valid UTF-8".to_string())),
        ResumeFormat::Pdf => {
            let bytes = upload.bytes;
            tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF decoding task failed: {e}")))?
            .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))
        }
    }
}
