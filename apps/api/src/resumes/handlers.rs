use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resumes::store::{active_resume, archive_upload, insert_resume};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ResumeUploadResponse {
    pub message: String,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ResumeMeta {
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ActiveResumeResponse {
    pub resume: Option<ResumeMeta>,
}

/// POST /api/v1/resume
///
/// Multipart upload, field name `file`. The upload replaces the active
/// resume for all future scoring; older resumes stay in the table unused.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let (filename, bytes) = extract_file_field(&mut multipart).await?;
    let content = decode_text(&bytes);

    let s3_key = archive_upload(&state.s3, &state.config.s3_bucket, &filename, bytes).await?;
    let resume = insert_resume(&state.db, &filename, &content, Some(&s3_key)).await?;
    info!(
        "Stored resume '{}' ({} chars of text)",
        resume.filename,
        resume.content.len()
    );

    Ok(Json(ResumeUploadResponse {
        message: "Resume uploaded successfully".to_string(),
        filename: resume.filename,
        uploaded_at: resume.uploaded_at,
    }))
}

/// GET /api/v1/resume
pub async fn handle_get_active(
    State(state): State<AppState>,
) -> Result<Json<ActiveResumeResponse>, AppError> {
    let resume = active_resume(&state.db).await?;
    Ok(Json(ActiveResumeResponse {
        resume: resume.map(|r| ResumeMeta {
            filename: r.filename,
            uploaded_at: r.uploaded_at,
        }),
    }))
}

/// Pulls the `file` field out of the multipart body.
async fn extract_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::Validation("No file selected".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        return Ok((filename, bytes));
    }

    Err(AppError::Validation(
        "No file part in the request".to_string(),
    ))
}

/// Decodes upload bytes as UTF-8, reading them as Latin-1 when they are not
/// valid UTF-8. Resume parsing beyond plain text is out of scope.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_passthrough() {
        assert_eq!(decode_text("plain text résumé".as_bytes()), "plain text résumé");
    }

    #[test]
    fn test_decode_invalid_utf8_falls_back_to_latin1() {
        // 0xE9 is 'é' in Latin-1 but invalid as a standalone UTF-8 byte
        let bytes = [b'r', 0xE9, b's', b'u', b'm', 0xE9];
        assert_eq!(decode_text(&bytes), "résumé");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_text(&[]), "");
    }
}
