use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume. The most recently uploaded row is the "active" resume;
/// older rows are retained but never consulted for scoring.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub filename: String,
    /// Extracted plain text, the input to tokenization.
    pub content: String,
    /// Object-storage key of the archived raw upload, when archiving succeeded.
    pub s3_key: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}
