use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored job posting. `job_title` is the only required text field; the
/// rest arrive from scrapers in whatever shape they were found.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub job_title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub apply_link: Option<String>,
    pub search_key: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// One row of the companies summary: a company with at least one posting
/// that carries an apply link.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub company: String,
    pub careers_url: String,
    pub job_count: i64,
}
