//! Shared formatting helpers for the dashboard.
//!
//! All pure formatting functions (no ratatui styles, no UI layout) live here.

use chrono::{DateTime, NaiveDate, Utc};

/// Recency classification for a contributor's last submission.
///
/// Thresholds: under 24 hours is fresh, under 72 hours is aging, anything
/// older is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Fresh,
    Aging,
    Stale,
}

/// Classifies how recent a timestamp is relative to `now`.
pub fn staleness(then: DateTime<Utc>, now: DateTime<Utc>) -> Staleness {
    let hours = now.signed_duration_since(then).num_hours();
    if hours < 24 {
        Staleness::Fresh
    } else if hours < 72 {
        Staleness::Aging
    } else {
        Staleness::Stale
    }
}

/// Format a timestamp as a compact age relative to `now`.
///
/// `"just now"` under a minute, then `"5m ago"`, `"3h ago"`, `"4d ago"`.
/// Future timestamps render as `"just now"`.
pub fn format_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(then).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a timestamp as `YYYY-MM-DD HH:MM` (UTC).
pub fn format_datetime(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a whole percentage: `"75%"`.
pub fn format_percent(pct: u8) -> String {
    format!("{pct}%")
}

/// Format a 0..=1 ratio with two decimals: `"0.89"`.
pub fn format_ratio(ratio: f64) -> String {
    format!("{ratio:.2}")
}

/// Format a 1..=5 grade: `"4/5"`.
pub fn format_grade(grade: u8) -> String {
    format!("{grade}/5")
}

/// Format a completed-out-of-total pair: `"15/50"`.
pub fn format_fraction(done: u32, total: u32) -> String {
    format!("{done}/{total}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn age_buckets() {
        let now = at(1_000_000);
        assert_eq!(format_age(at(1_000_000 - 30), now), "just now");
        assert_eq!(format_age(at(1_000_000 - 300), now), "5m ago");
        assert_eq!(format_age(at(1_000_000 - 7200), now), "2h ago");
        assert_eq!(format_age(at(1_000_000 - 3 * 86400), now), "3d ago");
    }

    #[test]
    fn staleness_thresholds() {
        let now = at(1_000_000);
        assert_eq!(staleness(at(1_000_000 - 3600), now), Staleness::Fresh);
        assert_eq!(staleness(at(1_000_000 - 30 * 3600), now), Staleness::Aging);
        assert_eq!(staleness(at(1_000_000 - 100 * 3600), now), Staleness::Stale);
    }

    #[test]
    fn simple_formats() {
        assert_eq!(format_percent(75), "75%");
        assert_eq!(format_ratio(0.894), "0.89");
        assert_eq!(format_grade(4), "4/5");
        assert_eq!(format_fraction(15, 50), "15/50");
    }
}
