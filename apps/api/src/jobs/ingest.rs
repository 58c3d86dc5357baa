//! Ingest payload normalization.
//!
//! Scrapers submit jobs under historical alias spellings (`title` vs
//! `job_title`, `link` vs `apply_link`, `date_posted` vs `posted_at`).
//! Aliases resolve here, once, with a fixed precedence per field, so the
//! rest of the crate only ever sees the canonical names.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// A job entry as submitted. Every field is optional at this stage; entries
/// without a resolvable title are skipped during normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPayload {
    pub job_title: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub apply_link: Option<String>,
    pub link: Option<String>,
    pub search_key: Option<String>,
    pub description: Option<String>,
    pub posted_at: Option<String>,
    pub date_posted: Option<String>,
}

/// The ingest endpoint accepts a single job object or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IngestBody {
    Batch(Vec<JobPayload>),
    Single(Box<JobPayload>),
}

impl IngestBody {
    pub fn into_payloads(self) -> Vec<JobPayload> {
        match self {
            IngestBody::Batch(payloads) => payloads,
            IngestBody::Single(payload) => vec![*payload],
        }
    }
}

/// A normalized job ready for persistence.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub job_title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub apply_link: Option<String>,
    pub search_key: Option<String>,
    pub description: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
}

/// Resolves aliases with fixed precedence: `job_title` over `title`,
/// `apply_link` over `link`, `posted_at` over `date_posted`. An empty string
/// under the preferred name falls through to the alias.
///
/// Returns `None` when no title is present under either name.
pub fn normalize(payload: JobPayload) -> Option<NewJob> {
    let job_title = first_non_empty([payload.job_title, payload.title])?;
    let apply_link = first_non_empty([payload.apply_link, payload.link]);
    let posted_at = first_non_empty([payload.posted_at, payload.date_posted])
        .and_then(|raw| parse_posted_at(&raw));

    Some(NewJob {
        job_title,
        company: payload.company,
        location: payload.location,
        salary: payload.salary,
        apply_link,
        search_key: payload.search_key,
        description: payload.description,
        posted_at,
    })
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

/// Parses the loose timestamp formats scrapers send: RFC 3339, naive
/// `YYYY-MM-DD[T ]HH:MM:SS[.f]`, or a bare date. Unparseable values are
/// treated as absent rather than rejected.
pub fn parse_posted_at(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_job_title_takes_precedence_over_title() {
        let normalized = normalize(JobPayload {
            job_title: Some("Backend Engineer".to_string()),
            title: Some("Ignored".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(normalized.job_title, "Backend Engineer");
    }

    #[test]
    fn test_title_alias_is_accepted() {
        let normalized = normalize(JobPayload {
            title: Some("Backend Engineer".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(normalized.job_title, "Backend Engineer");
    }

    #[test]
    fn test_empty_preferred_name_falls_through_to_alias() {
        let normalized = normalize(JobPayload {
            job_title: Some(String::new()),
            title: Some("Backend Engineer".to_string()),
            apply_link: Some(String::new()),
            link: Some("https://acme.dev/jobs/1".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(normalized.job_title, "Backend Engineer");
        assert_eq!(
            normalized.apply_link.as_deref(),
            Some("https://acme.dev/jobs/1")
        );
    }

    #[test]
    fn test_entry_without_title_is_skipped() {
        let payload = JobPayload {
            company: Some("Acme".to_string()),
            ..Default::default()
        };
        assert!(normalize(payload).is_none());
    }

    #[test]
    fn test_posted_at_rfc3339() {
        let ts = parse_posted_at("2024-03-01T09:30:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 7, 30, 0).unwrap());
    }

    #[test]
    fn test_posted_at_naive_datetime_is_utc() {
        let ts = parse_posted_at("2024-03-01T09:30:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_posted_at_bare_date_is_midnight_utc() {
        let ts = parse_posted_at("2024-03-01").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_unparseable_posted_at_is_dropped() {
        assert!(parse_posted_at("yesterday").is_none());
        let normalized = normalize(JobPayload {
            job_title: Some("Engineer".to_string()),
            posted_at: Some("yesterday".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(normalized.posted_at.is_none());
    }

    #[test]
    fn test_body_accepts_single_object_or_array() {
        let single: IngestBody =
            serde_json::from_str(r#"{"job_title": "Engineer"}"#).unwrap();
        assert_eq!(single.into_payloads().len(), 1);

        let batch: IngestBody =
            serde_json::from_str(r#"[{"job_title": "A"}, {"title": "B"}]"#).unwrap();
        assert_eq!(batch.into_payloads().len(), 2);
    }
}
