use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::ingest::{normalize, IngestBody};
use crate::jobs::queries::{get_job, list_companies, list_jobs, update_status, upsert_job};
use crate::jobs::timeframe::timeframe_cutoff;
use crate::models::job::{CompanyRow, JobRow};
use crate::resumes::store::active_resume_tokens;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListJobsQuery {
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
}

fn default_timeframe() -> String {
    "recent".to_string()
}

/// A job as served to clients: the stored row plus its score against the
/// active resume. `matching_score` is null when no resume has been uploaded.
#[derive(Serialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub job_title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub apply_link: Option<String>,
    pub search_key: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub matching_score: Option<f64>,
    pub posted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl JobResponse {
    fn from_row(job: JobRow, matching_score: Option<f64>) -> Self {
        JobResponse {
            id: job.id,
            job_title: job.job_title,
            company: job.company,
            location: job.location,
            salary: job.salary,
            apply_link: job.apply_link,
            search_key: job.search_key,
            description: job.description,
            status: job.status,
            matching_score,
            posted_at: job.posted_at,
            created_at: job.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ResumeStatus {
    pub filename: Option<String>,
    pub available: bool,
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobResponse>,
    pub resume: ResumeStatus,
}

#[derive(Serialize)]
pub struct IngestResponse {
    pub job_ids: Vec<Uuid>,
    pub skipped: usize,
}

/// POST /api/v1/jobs
///
/// Accepts a single job object or an array. Entries without a title are
/// skipped; entries whose apply link matches an existing row
/// (case-insensitive) update that row instead of creating a duplicate.
pub async fn handle_ingest(
    State(state): State<AppState>,
    Json(body): Json<IngestBody>,
) -> Result<(StatusCode, Json<IngestResponse>), AppError> {
    let mut job_ids = Vec::new();
    let mut skipped = 0;

    for payload in body.into_payloads() {
        match normalize(payload) {
            Some(new_job) => job_ids.push(upsert_job(&state.db, &new_job).await?),
            None => skipped += 1,
        }
    }

    Ok((StatusCode::CREATED, Json(IngestResponse { job_ids, skipped })))
}

/// GET /api/v1/jobs?timeframe=
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let cutoff = timeframe_cutoff(&params.timeframe, Utc::now());
    let rows = list_jobs(&state.db, cutoff).await?;
    let (resume_tokens, resume) = active_resume_tokens(&state.db).await?;

    let mut jobs = Vec::with_capacity(rows.len());
    for job in rows {
        let score = state.scorer.score(&job, &resume_tokens).await;
        jobs.push(JobResponse::from_row(job, score));
    }

    Ok(Json(JobListResponse {
        jobs,
        resume: ResumeStatus {
            filename: resume.map(|r| r.filename),
            available: !resume_tokens.is_empty(),
        },
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobResponse>, AppError> {
    let job = get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    let (resume_tokens, _) = active_resume_tokens(&state.db).await?;
    let score = state.scorer.score(&job, &resume_tokens).await;

    Ok(Json(JobResponse::from_row(job, score)))
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// POST /api/v1/jobs/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<StatusCode, AppError> {
    let status = req.status.trim();
    if status.is_empty() {
        return Err(AppError::Validation("Status is required".to_string()));
    }
    if !update_status(&state.db, id, status).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/jobs/:id/apply — shorthand for setting status to "applied".
pub async fn handle_mark_applied(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !update_status(&state.db, id, "applied").await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    Ok(Json(list_companies(&state.db).await?))
}
