use chrono::{DateTime, Duration, Utc};

/// Render a timestamp as a "N units ago" string relative to `now`, using the
/// largest unit that fits (seconds up through years). Weeks start at 7 days,
/// so 8 days ago renders as "1 week ago".
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;

    if elapsed < Duration::zero() {
        return "in the future".to_string();
    }

    if elapsed < Duration::minutes(1) {
        pluralize(elapsed.num_seconds(), "second")
    } else if elapsed < Duration::hours(1) {
        pluralize(elapsed.num_minutes(), "minute")
    } else if elapsed < Duration::days(1) {
        pluralize(elapsed.num_hours(), "hour")
    } else if elapsed < Duration::days(7) {
        pluralize(elapsed.num_days(), "day")
    } else if elapsed < Duration::days(30) {
        pluralize(elapsed.num_days() / 7, "week")
    } else if elapsed < Duration::days(365) {
        pluralize(elapsed.num_days() / 30, "month")
    } else {
        pluralize(elapsed.num_days() / 365, "year")
    }
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
