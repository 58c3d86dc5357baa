//! Match scoring — pluggable, trait-based scorer that measures a job posting
//! against the active resume's token set.
//!
//! Default: `TokenOverlapScorer` (pure-Rust, fast, deterministic, fully
//! testable). `AppState` holds an `Arc<dyn MatchScorer>`, so a different
//! backend can be swapped in without touching handler code.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::matching::tokenizer::tokenize;
use crate::models::job::JobRow;

/// Joins the job's non-empty text fields with single spaces, in a fixed
/// order: title, company, location, salary, search key, description.
pub fn combined_job_text(job: &JobRow) -> String {
    let parts = [
        Some(job.job_title.as_str()),
        job.company.as_deref(),
        job.location.as_deref(),
        job.salary.as_deref(),
        job.search_key.as_deref(),
        job.description.as_deref(),
    ];
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Percentage of the job's tokens that also appear in `resume_tokens`,
/// rounded to two decimal places.
///
/// Returns `None` when `resume_tokens` is empty (no resume uploaded) — this
/// distinguishes "no resume" from "resume present but zero overlap" — and
/// `Some(0.0)` when the job has no extractable tokens.
///
/// The denominator is the job's token count, not the resume's: this is a
/// recall-style metric from the job's perspective, not Jaccard similarity.
pub fn compute_matching_score(job: &JobRow, resume_tokens: &HashSet<String>) -> Option<f64> {
    if resume_tokens.is_empty() {
        return None;
    }

    let job_tokens = tokenize(&combined_job_text(job));
    if job_tokens.is_empty() {
        return Some(0.0);
    }

    let overlap = job_tokens.intersection(resume_tokens).count();
    let score = overlap as f64 / job_tokens.len() as f64 * 100.0;
    Some((score * 100.0).round() / 100.0)
}

/// The match scorer seam. Implement this to swap scoring backends without
/// touching the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, job: &JobRow, resume_tokens: &HashSet<String>) -> Option<f64>;
}

/// Token-overlap scorer. Pure, synchronous under the hood, no I/O.
pub struct TokenOverlapScorer;

#[async_trait]
impl MatchScorer for TokenOverlapScorer {
    async fn score(&self, job: &JobRow, resume_tokens: &HashSet<String>) -> Option<f64> {
        compute_matching_score(job, resume_tokens)
    }
}
