use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn from_rfc3339(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

fn round_div(value: i64, by: i64) -> i64 {
    (value as f64 / by as f64).round() as i64
}

/// Relative "posted" label for a vacancy card.
pub fn format_posted(posted: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(posted) = posted else {
        return "Date not available".to_string();
    };

    let seconds = (now - posted).num_milliseconds() as f64 / 1000.0;
    let seconds = seconds.round() as i64;
    if seconds < 5 {
        return "Just now".to_string();
    }
    if seconds < 60 {
        return format!("{} sec ago", seconds);
    }
    let minutes = round_div(seconds, 60);
    if minutes < 60 {
        return format!("{} min ago", minutes);
    }
    let hours = round_div(minutes, 60);
    if hours < 24 {
        return format!("{} hr ago", hours);
    }
    let days = round_div(hours, 24);
    match days {
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 30 => format!("{} wk ago", d / 7),
        d if d < 365 => format!("{} mo ago", d / 30),
        _ => posted.format("%b %-d, %Y").to_string(),
    }
}
