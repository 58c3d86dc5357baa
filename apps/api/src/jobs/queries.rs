use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::ingest::NewJob;
use crate::models::job::{CompanyRow, JobRow};

/// Inserts `job`, or updates the existing row in place when `job` carries an
/// apply link already present (case-insensitive). A job without an apply
/// link always becomes a fresh row. Returns the affected row's id.
pub async fn upsert_job(pool: &PgPool, job: &NewJob) -> Result<Uuid, AppError> {
    if let Some(link) = job.apply_link.as_deref() {
        let existing: Option<JobRow> =
            sqlx::query_as("SELECT * FROM jobs WHERE LOWER(apply_link) = LOWER($1) LIMIT 1")
                .bind(link)
                .fetch_optional(pool)
                .await?;

        if let Some(existing) = existing {
            // Refresh everything except the link itself and created_at
            sqlx::query(
                r#"
                UPDATE jobs
                SET job_title = $1, company = $2, location = $3, salary = $4,
                    search_key = $5, description = $6, posted_at = $7
                WHERE id = $8
                "#,
            )
            .bind(&job.job_title)
            .bind(&job.company)
            .bind(&job.location)
            .bind(&job.salary)
            .bind(&job.search_key)
            .bind(&job.description)
            .bind(job.posted_at)
            .bind(existing.id)
            .execute(pool)
            .await?;

            info!("Updated job {} via apply link match", existing.id);
            return Ok(existing.id);
        }
    }

    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO jobs
            (job_title, company, location, salary, apply_link, search_key, description, posted_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(&job.job_title)
    .bind(&job.company)
    .bind(&job.location)
    .bind(&job.salary)
    .bind(&job.apply_link)
    .bind(&job.search_key)
    .bind(&job.description)
    .bind(job.posted_at)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Lists jobs newest-first, optionally restricted to rows created at or
/// after `cutoff`.
pub async fn list_jobs(
    pool: &PgPool,
    cutoff: Option<DateTime<Utc>>,
) -> Result<Vec<JobRow>, AppError> {
    let rows = match cutoff {
        Some(cutoff) => {
            sqlx::query_as::<_, JobRow>(
                "SELECT * FROM jobs WHERE created_at >= $1 ORDER BY created_at DESC",
            )
            .bind(cutoff)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, AppError> {
    Ok(sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Sets a job's application status. Returns false when the id is unknown.
pub async fn update_status(pool: &PgPool, id: Uuid, status: &str) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE jobs SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Companies with at least one posting that carries an apply link, each with
/// its most recently ingested link and posting count.
pub async fn list_companies(pool: &PgPool) -> Result<Vec<CompanyRow>, AppError> {
    Ok(sqlx::query_as::<_, CompanyRow>(
        r#"
        SELECT company,
               (ARRAY_AGG(apply_link ORDER BY created_at DESC))[1] AS careers_url,
               COUNT(*) AS job_count
        FROM jobs
        WHERE company IS NOT NULL AND apply_link IS NOT NULL
        GROUP BY company
        ORDER BY company
        "#,
    )
    .fetch_all(pool)
    .await?)
}
