//! Shared parsing and formatting helpers for CLI commands.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc, Weekday};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Parse a deadline: RFC 3339, local `YYYY-MM-DD HH:MM`, or a relative
/// `+<minutes>m` / `+<hours>h` offset from now.
pub fn parse_deadline(input: &str) -> Result<DateTime<Utc>, String> {
    if let Some(rest) = input.strip_prefix('+') {
        let (number, unit) = rest.split_at(rest.len().saturating_sub(1));
        let amount: i64 = number
            .parse()
            .map_err(|_| format!("invalid relative deadline '{input}'"))?;
        let delta = match unit {
            "m" => Duration::minutes(amount),
            "h" => Duration::hours(amount),
            "d" => Duration::days(amount),
            _ => return Err(format!("invalid relative deadline '{input}' (use m/h/d)")),
        };
        return Ok(Utc::now() + delta);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .map_err(|_| format!("invalid deadline '{input}' (expected 'YYYY-MM-DD HH:MM')"))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("ambiguous local time '{input}'"))
}

/// Parse `HH:MM` into milliseconds since midnight.
pub fn parse_time_of_day(input: &str) -> Result<i64, String> {
    let (h, m) = input
        .split_once(':')
        .ok_or_else(|| format!("invalid time '{input}' (expected HH:MM)"))?;
    let hour: i64 = h.parse().map_err(|_| format!("invalid hour in '{input}'"))?;
    let minute: i64 = m
        .parse()
        .map_err(|_| format!("invalid minute in '{input}'"))?;
    if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
        return Err(format!("time '{input}' out of range"));
    }
    Ok(hour * 3_600_000 + minute * 60_000)
}

/// Parse a weekday name, short or long, case-insensitive.
pub fn parse_weekday(input: &str) -> Result<Weekday, String> {
    input
        .parse::<Weekday>()
        .map_err(|_| format!("invalid day '{input}' (use mon..sun)"))
}

/// Format milliseconds-of-day as `HH:MM`.
pub fn fmt_time_of_day(ms: i64) -> String {
    format!("{:02}:{:02}", ms / 3_600_000, ms % 3_600_000 / 60_000)
}

/// Format a millisecond duration as `Hh MMm`.
pub fn fmt_duration(ms: i64) -> String {
    let minutes = ms / 60_000;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}
