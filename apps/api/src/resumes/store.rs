use std::collections::HashSet;

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::tokenizer::tokenize;
use crate::models::resume::ResumeRow;

/// Inserts a new resume row. It becomes the active resume by virtue of
/// carrying the newest upload timestamp.
pub async fn insert_resume(
    pool: &PgPool,
    filename: &str,
    content: &str,
    s3_key: Option<&str>,
) -> Result<ResumeRow, AppError> {
    Ok(sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (filename, content, s3_key)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(filename)
    .bind(content)
    .bind(s3_key)
    .fetch_one(pool)
    .await?)
}

/// The active resume: single-row lookup, most recent upload wins.
pub async fn active_resume(pool: &PgPool) -> Result<Option<ResumeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY uploaded_at DESC LIMIT 1")
            .fetch_optional(pool)
            .await?,
    )
}

/// Token set of the active resume, plus the row itself. Jobs are scored
/// against exactly this set; it is empty when no resume exists or the active
/// resume has no extractable tokens.
pub async fn active_resume_tokens(
    pool: &PgPool,
) -> Result<(HashSet<String>, Option<ResumeRow>), AppError> {
    let resume = active_resume(pool).await?;
    let tokens = resume
        .as_ref()
        .map(|r| tokenize(&r.content))
        .unwrap_or_default();
    Ok((tokens, resume))
}

/// Archives the raw upload bytes to object storage under a per-upload key.
pub async fn archive_upload(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    filename: &str,
    bytes: Bytes,
) -> Result<String, AppError> {
    let key = format!("resumes/{}/{}", Uuid::new_v4(), filename);

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(bytes))
        .content_type("application/octet-stream")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume archive failed: {e}")))?;

    info!("Archived resume upload to s3://{bucket}/{key}");
    Ok(key)
}
