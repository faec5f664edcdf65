use chrono::{DateTime, Utc};

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
// Gregorian averages
const SECONDS_PER_MONTH: f64 = SECONDS_PER_DAY * 30.436_875;
const SECONDS_PER_YEAR: f64 = SECONDS_PER_DAY * 365.242_5;

/// Human phrase for the distance between `then` and `now`, e.g. "3 hours ago".
pub fn from_now(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let millis = (now - then).num_milliseconds();
    let phrase = distance(millis.unsigned_abs() as f64 / 1_000.0);
    if millis < 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

/// Relative created time, or `-` when unknown.
pub fn created_label(created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    created
        .map(|created| from_now(created, now))
        .unwrap_or_else(|| "-".to_string())
}

fn counted(n: f64, one: &str, unit: &str) -> String {
    if n <= 1.0 {
        one.to_string()
    } else {
        format!("{} {}", n, unit)
    }
}

fn distance(seconds: f64) -> String {
    if seconds.round() <= 44.0 {
        return "a few seconds".to_string();
    }
    if seconds.round() <= 89.0 {
        return "a minute".to_string();
    }

    let minutes = (seconds / SECONDS_PER_MINUTE).round();
    if minutes <= 44.0 {
        return counted(minutes, "a minute", "minutes");
    }
    if minutes <= 89.0 {
        return "an hour".to_string();
    }

    let hours = (seconds / SECONDS_PER_HOUR).round();
    if hours <= 21.0 {
        return counted(hours, "an hour", "hours");
    }
    if hours <= 35.0 {
        return "a day".to_string();
    }

    let days = (seconds / SECONDS_PER_DAY).round();
    if days <= 25.0 {
        return counted(days, "a day", "days");
    }
    if days <= 45.0 {
        return "a month".to_string();
    }

    let months = (seconds / SECONDS_PER_MONTH).round();
    if months <= 10.0 {
        return counted(months, "a month", "months");
    }
    if months <= 17.0 {
        return "a year".to_string();
    }

    counted((seconds / SECONDS_PER_YEAR).round(), "a year", "years")
}
