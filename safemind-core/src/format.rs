//! Formatting helpers shared by the CLI and report views.

use chrono::NaiveDate;

/// Format a calendar date for display (e.g., "05 Mar 2024").
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Get day name from a Sunday-based index.
pub fn day_name(day: u8) -> &'static str {
    match day {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}

/// 12-hour label for an hour bucket (e.g., "2pm", "12am").
pub fn hour_label(hour: u8) -> String {
    let h = hour % 12;
    let h = if h == 0 { 12 } else { h };
    let period = if hour % 24 < 12 { "am" } else { "pm" };
    format!("{}{}", h, period)
}

/// Get hour range display (e.g., "2pm-3pm").
pub fn hour_range_display(hour: u8) -> String {
    format!("{}-{}", hour_label(hour), hour_label((hour + 1) % 24))
}

/// Parse a 12-hour label such as "2pm" or "12AM" into 0-23.
pub fn parse_hour_label(label: &str) -> Option<u8> {
    let label = label.trim().to_lowercase();
    let (digits, period) = if let Some(d) = label.strip_suffix("am") {
        (d, "am")
    } else if let Some(d) = label.strip_suffix("pm") {
        (d, "pm")
    } else {
        return None;
    };
    let hour: u8 = digits.trim().parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    Some(match (hour, period) {
        (12, "am") => 0,
        (12, _) => 12,
        (h, "pm") => h + 12,
        (h, _) => h,
    })
}

/// Format exposure seconds as whole minutes (e.g., "3 minutes").
pub fn format_minutes(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round() as i64;
    format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
}

/// Format exposure seconds compactly (e.g., "1h 2m", "2m 15s", "45s").
pub fn format_duration_secs(seconds: f64) -> String {
    let secs = seconds.max(0.0).round() as i64;
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let rem = secs % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m {}s", mins, rem)
    } else {
        format!("{}s", rem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_labels() {
        assert_eq!(hour_label(0), "12am");
        assert_eq!(hour_label(11), "11am");
        assert_eq!(hour_label(12), "12pm");
        assert_eq!(hour_label(14), "2pm");
        assert_eq!(hour_range_display(23), "11pm-12am");
    }

    #[test]
    fn test_parse_hour_label() {
        assert_eq!(parse_hour_label("12am"), Some(0));
        assert_eq!(parse_hour_label("12PM"), Some(12));
        assert_eq!(parse_hour_label("2pm"), Some(14));
        assert_eq!(parse_hour_label("9am"), Some(9));
        assert_eq!(parse_hour_label("13pm"), None);
        assert_eq!(parse_hour_label("2"), None);
    }

    #[test]
    fn test_duration_formats() {
        assert_eq!(format_minutes(105.0), "2 minutes");
        assert_eq!(format_minutes(60.0), "1 minute");
        assert_eq!(format_duration_secs(135.0), "2m 15s");
        assert_eq!(format_duration_secs(3720.0), "1h 2m");
        assert_eq!(format_duration_secs(45.0), "45s");
    }

    #[test]
    fn test_display_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_display_date(date), "05 Mar 2024");
        assert_eq!(day_name(2), "Tuesday");
    }
}
