use chrono::{Duration, NaiveDateTime};

/// Time left until `until`, never negative.
pub(crate) fn remaining(until: NaiveDateTime, now: NaiveDateTime) -> Duration {
    let remaining = until.signed_duration_since(now);
    if remaining < Duration::zero() {
        Duration::zero()
    } else {
        remaining
    }
}

/// `HH:MM:SS`, hours are total hours and the sub-second part is dropped.
pub(crate) fn format_countdown(remaining: Duration) -> String {
    let total_seconds = remaining.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
