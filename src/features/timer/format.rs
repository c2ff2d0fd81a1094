//! Timer text: clock display and human-friendly lengths.

use once_cell::sync::Lazy;
use regex::Regex;

// "1h30m", "25m", "90s", "1h 5m 10s"; every part optional but checked after matching
static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+)\s*h)?\s*(?:(\d+)\s*m)?\s*(?:(\d+)\s*s)?$")
        .unwrap_or_else(|e| panic!("Invalid duration regex: {e}"))
});

/// Format a number of seconds as MM:SS.
///
/// Minutes are not wrapped into hours, so 90 minutes renders as `90:00`.
#[must_use]
pub fn format_seconds_mmss(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Describe a length in words, e.g. `1 hour 30 minutes`.
#[must_use]
pub fn describe_seconds(total_seconds: u32) -> String {
    let parts: Vec<String> = [
        (total_seconds / 3600, "hour"),
        (total_seconds % 3600 / 60, "minute"),
        (total_seconds % 60, "second"),
    ]
    .into_iter()
    .filter(|(value, _)| *value > 0)
    .map(|(value, unit)| format!("{value} {unit}{}", if value == 1 { "" } else { "s" }))
    .collect();

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(" ")
    }
}

/// Parse a phase length into seconds.
///
/// Accepts `25m`, `1h30m`, `90s` and combinations; a bare number is read as
/// minutes. Zero and anything that does not fit the timer yield `None`.
#[must_use]
pub fn parse_duration(s: &str) -> Option<u32> {
    let s = s.trim().to_ascii_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Ok(minutes) = s.parse::<u32>() {
        return minutes.checked_mul(60).filter(|&total| total > 0);
    }

    let caps = DURATION_PATTERN.captures(&s)?;
    let mut total: u32 = 0;
    for (group, scale) in [(1, 3600_u32), (2, 60), (3, 1)] {
        if let Some(part) = caps.get(group) {
            let value: u32 = part.as_str().parse().ok()?;
            total = total.checked_add(value.checked_mul(scale)?)?;
        }
    }

    (total > 0).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds_mmss() {
        assert_eq!(format_seconds_mmss(25 * 60), "25:00");
        assert_eq!(format_seconds_mmss(90), "01:30");
        assert_eq!(format_seconds_mmss(0), "00:00");
        assert_eq!(format_seconds_mmss(90 * 60), "90:00");
    }

    #[test]
    fn test_describe_seconds() {
        assert_eq!(describe_seconds(40 * 60), "40 minutes");
        assert_eq!(describe_seconds(60), "1 minute");
        assert_eq!(describe_seconds(2 * 3600), "2 hours");
        assert_eq!(describe_seconds(90 * 60), "1 hour 30 minutes");
        assert_eq!(describe_seconds(61), "1 minute 1 second");
        assert_eq!(describe_seconds(0), "0 seconds");
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_duration("25"), Some(25 * 60));
        assert_eq!(parse_duration("25m"), Some(25 * 60));
        assert_eq!(parse_duration(" 40M "), Some(40 * 60));
    }

    #[test]
    fn test_parse_combined_units() {
        assert_eq!(parse_duration("1h"), Some(3600));
        assert_eq!(parse_duration("2h30m"), Some(150 * 60));
        assert_eq!(parse_duration("1h 5m 10s"), Some(3910));
        assert_eq!(parse_duration("90s"), Some(90));
        assert_eq!(parse_duration("1m30s"), Some(90));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration("0m0s"), None);
        assert_eq!(parse_duration("-5"), None);
        assert_eq!(parse_duration("5x"), None);
        assert_eq!(parse_duration("30s5m"), None);
        assert_eq!(parse_duration("99999999h"), None);
    }
}
