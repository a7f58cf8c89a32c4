use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

/// Shown where a value cannot be computed, e.g. an average of nothing.
pub const PLACEHOLDER: &str = "n/a";

/// 125 -> "2m 5s"
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Ratio in 0..1 as a percentage with one decimal, halves rounded away from zero.
pub fn format_percent(ratio: f64) -> String {
    let tenths = (ratio * 1000.0).round() / 10.0;
    format!("{tenths:.1}%")
}

pub fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(value) if value.is_finite() => format_percent(value),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_datetime<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn format_short_datetime<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format("%b %-d, %Y %H:%M")
        .to_string()
}

/// 1500 -> "1,500"
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn durations_split_minutes_and_seconds() {
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(45), "0m 45s");
        assert_eq!(format_duration(1800), "30m 0s");
        assert_eq!(format_duration(0), "0m 0s");
    }

    #[test]
    fn average_quality_rounds_to_one_decimal() {
        let avg = average([0.95, 0.88, 0.92, 0.78]);
        assert!((avg.unwrap() - 0.8825).abs() < 1e-9);
        assert_eq!(format_average(avg), "88.3%");
    }

    #[test]
    fn empty_average_renders_placeholder() {
        let avg = average(Vec::<f64>::new());
        assert_eq!(avg, None);
        assert_eq!(format_average(avg), PLACEHOLDER);
    }

    #[test]
    fn percent_formats_ratios() {
        assert_eq!(format_percent(0.85), "85.0%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1500), "1,500");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn datetimes_follow_the_given_timezone() {
        let ts: DateTime<Utc> = "2024-01-15T10:30:00Z".parse().unwrap();
        assert_eq!(format_datetime(&ts, &Utc), "2024-01-15 10:30:00");

        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_datetime(&ts, &seoul), "2024-01-15 19:30:00");
        assert_eq!(format_short_datetime(&ts, &seoul), "Jan 15, 2024 19:30");
    }
}
