use chrono::{DateTime, Duration, Utc};

/// Maps a `timeframe` query value to a rolling-window cutoff relative to
/// `now`. `"recent"` and unrecognized values mean "no filter". Alias
/// spellings exist because scrapers and old dashboards disagree on names.
pub fn timeframe_cutoff(timeframe: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match timeframe {
        "24h" | "last24" | "last24h" | "last24hrs" | "last24hours" => {
            Some(now - Duration::hours(24))
        }
        "3d" | "72h" | "past3days" => Some(now - Duration::days(3)),
        "5d" | "past5days" => Some(now - Duration::days(5)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_24h_window() {
        assert_eq!(
            timeframe_cutoff("24h", now()),
            Some(Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_3d_window() {
        assert_eq!(
            timeframe_cutoff("3d", now()),
            Some(Utc.with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_5d_window() {
        assert_eq!(
            timeframe_cutoff("5d", now()),
            Some(Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_alias_spellings() {
        assert_eq!(timeframe_cutoff("last24hours", now()), timeframe_cutoff("24h", now()));
        assert_eq!(timeframe_cutoff("72h", now()), timeframe_cutoff("3d", now()));
        assert_eq!(timeframe_cutoff("past5days", now()), timeframe_cutoff("5d", now()));
    }

    #[test]
    fn test_recent_means_unfiltered() {
        assert_eq!(timeframe_cutoff("recent", now()), None);
    }

    #[test]
    fn test_unrecognized_means_unfiltered() {
        assert_eq!(timeframe_cutoff("7d", now()), None);
        assert_eq!(timeframe_cutoff("", now()), None);
    }
}
