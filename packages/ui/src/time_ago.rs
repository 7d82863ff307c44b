//! Relative timestamps for post headers ("5 minutes ago").

use chrono::{DateTime, Utc};

/// Describe how long before `now` the instant `then` was.
///
/// Instants in the future (clock skew between client and service) read as
/// "just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 45 {
        return "just now".to_string();
    }

    let minutes = (secs + 30) / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let (n, unit) = if minutes < 60 {
        (minutes.max(1), "minute")
    } else if hours < 24 {
        (hours, "hour")
    } else if days < 30 {
        (days, "day")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };

    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// [`time_ago`] against the current clock.
pub fn time_ago_now(then: DateTime<Utc>) -> String {
    time_ago(then, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(d: Duration) -> String {
        let now = Utc::now();
        time_ago(now - d, now)
    }

    #[test]
    fn test_time_ago_buckets() {
        assert_eq!(ago(Duration::seconds(5)), "just now");
        assert_eq!(ago(Duration::seconds(50)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::minutes(61)), "1 hour ago");
        assert_eq!(ago(Duration::hours(3)), "3 hours ago");
        assert_eq!(ago(Duration::days(1)), "1 day ago");
        assert_eq!(ago(Duration::days(12)), "12 days ago");
        assert_eq!(ago(Duration::days(65)), "2 months ago");
        assert_eq!(ago(Duration::days(800)), "2 years ago");
    }

    #[test]
    fn test_future_is_just_now() {
        assert_eq!(ago(Duration::minutes(-10)), "just now");
    }
}
