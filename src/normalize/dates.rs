use chrono::{Duration, NaiveDate};

/// Resolve a relative posted-date phrase ("Posted 3 days ago", "today",
/// "2w ago") against the capture date.
///
/// Rules are tried in order, first match wins. Anything unrecognized falls
/// back to the capture date itself — boards phrase staleness loosely and a
/// slightly-wrong date beats a dropped record. Months are a fixed 30 days so
/// the same phrase always resolves to the same offset.
pub fn resolve(phrase: &str, today: NaiveDate) -> NaiveDate {
    let text = phrase.trim().to_lowercase();

    if text.contains("today") || text.contains("just posted") || text.contains("just now") {
        return today;
    }
    if text.contains("yesterday") {
        return today - Duration::days(1);
    }
    // Hours collapse to the capture date; the schema is day-granular.
    if text.contains("hour") {
        return today;
    }
    if text.contains("day") || has_day_shorthand(&text) {
        if let Some(n) = leading_digits(&text) {
            return today - Duration::days(n);
        }
    }
    if text.contains("week") {
        if let Some(n) = leading_digits(&text) {
            return today - Duration::days(7 * n);
        }
    }
    if text.contains("month") {
        if let Some(n) = leading_digits(&text) {
            return today - Duration::days(30 * n);
        }
    }

    today
}

/// First run of digits in the phrase, tolerating adjacent non-digit
/// characters ("30+ days ago", "3d ago").
fn leading_digits(text: &str) -> Option<i64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// JobStreet abbreviates to "3d ago".
fn has_day_shorthand(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.windows(2).enumerate().any(|(i, w)| {
        w[0].is_ascii_digit()
            && w[1] == b'd'
            && bytes.get(i + 2).is_none_or(|c| !c.is_ascii_alphanumeric())
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_variants() {
        let d = day(2025, 6, 15);
        assert_eq!(resolve("today", d), d);
        assert_eq!(resolve("Just posted", d), d);
        assert_eq!(resolve("just now", d), d);
    }

    #[test]
    fn yesterday() {
        let d = day(2025, 6, 15);
        assert_eq!(resolve("Yesterday", d), day(2025, 6, 14));
    }

    #[test]
    fn hours_collapse_to_capture_date() {
        let d = day(2025, 6, 15);
        assert_eq!(resolve("5 hours ago", d), d);
        assert_eq!(resolve("Posted 23 hours ago", d), d);
    }

    #[test]
    fn days_ago() {
        let d = day(2025, 6, 15);
        assert_eq!(resolve("Posted 3 days ago", d), day(2025, 6, 12));
        assert_eq!(resolve("1 day ago", d), day(2025, 6, 14));
        assert_eq!(resolve("30+ days ago", d), day(2025, 5, 16));
    }

    #[test]
    fn day_shorthand() {
        let d = day(2025, 6, 15);
        assert_eq!(resolve("3d ago", d), day(2025, 6, 12));
    }

    #[test]
    fn weeks_ago() {
        let d = day(2025, 6, 15);
        assert_eq!(resolve("2 weeks ago", d), day(2025, 6, 1));
    }

    #[test]
    fn months_are_thirty_days() {
        let d = day(2025, 6, 15);
        assert_eq!(resolve("1 month ago", d), day(2025, 5, 16));
        assert_eq!(resolve("3 months ago", d), day(2025, 3, 17));
    }

    #[test]
    fn unrecognized_falls_back_to_capture_date() {
        let d = day(2025, 6, 15);
        assert_eq!(resolve("Posted eons ago", d), d);
        assert_eq!(resolve("", d), d);
    }

    #[test]
    fn crosses_month_boundary() {
        let d = day(2025, 3, 2);
        assert_eq!(resolve("5 days ago", d), day(2025, 2, 25));
    }
}
