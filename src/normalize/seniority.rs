use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seniority {
    Internship,
    EntryLevel,
    NonEntryLevel,
    NotSpecified,
}

impl Seniority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Internship => "Internship",
            Seniority::EntryLevel => "Entry Level",
            Seniority::NonEntryLevel => "Non-Entry Level",
            Seniority::NotSpecified => "Not specified",
        }
    }
}

const SENIOR_KEYWORDS: &[&str] = &[
    "senior", "lead", "principal", "manager", "supervisor", "head of",
    "director", "architect",
];

const ENTRY_KEYWORDS: &[&str] = &[
    "fresh graduate", "new graduate", "entry level", "junior developer",
    "junior engineer",
];

// Board-native labels collapse to the same three buckets; Kalibrr and
// LinkedIn use richer vocabularies than the posting text itself.
const ENTRY_LABEL_INDICATORS: &[&str] = &[
    "entry level", "entry-level", "associate", "junior", "graduate",
    "fresher", "beginner",
];

// "5-15 years", "5+ years", "5 to 10 years", "minimum 3 years",
// "at least 2 years". Group 1 is always the minimum.
static YEARS_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\d+)\s*-\s*(\d+)\s*(?:years?|yrs?)",
        r"(\d+)\+\s*(?:years?|yrs?)",
        r"(\d+)\s*to\s*(\d+)\s*(?:years?|yrs?)",
        r"minimum\s*(?:of\s*)?(\d+)\s*(?:years?|yrs?)",
        r"at\s*least\s*(\d+)\s*(?:years?|yrs?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Classify seniority from title, description, and the board-native label
/// (where the source exposes one). Rules run top-to-bottom, first match
/// wins. An explicit years-of-experience requirement is authoritative in
/// either direction: a "Senior ..." title asking for "minimum 1 year" is
/// Entry Level, a bland title asking for "5+ years" is Non-Entry Level.
pub fn classify(title: &str, description: &str, label: Option<&str>) -> Seniority {
    let combined = format!("{} {}", title, description).to_lowercase();
    let label = label.map(str::trim).filter(|l| !l.is_empty());
    let label_lower = label.map(str::to_lowercase);

    // 1. Internship anywhere trumps everything.
    if combined.contains("internship")
        || label_lower.as_deref().is_some_and(|l| l.contains("internship"))
    {
        return Seniority::Internship;
    }

    // 2. Whole-field "Fresher" label. Only the exact label counts; "fresher"
    //    buried in prose falls through to the text rules.
    if label_lower.as_deref() == Some("fresher") {
        return Seniority::EntryLevel;
    }

    // 3. Explicit experience requirement outranks keyword hits.
    if let Some(years) = minimum_years(&combined) {
        return if years >= 2 {
            Seniority::NonEntryLevel
        } else {
            Seniority::EntryLevel
        };
    }

    // 4/5. Keyword rules, senior side first.
    if SENIOR_KEYWORDS.iter().any(|k| combined.contains(k)) {
        return Seniority::NonEntryLevel;
    }
    if ENTRY_KEYWORDS.iter().any(|k| combined.contains(k)) {
        return Seniority::EntryLevel;
    }
    if let Some(l) = label_lower.as_deref() {
        if ENTRY_LABEL_INDICATORS.iter().any(|k| l.contains(k)) {
            return Seniority::EntryLevel;
        }
    }

    if combined.trim().is_empty() && label.is_none() {
        return Seniority::NotSpecified;
    }

    // 6. Default: postings that say nothing skew experienced.
    Seniority::NonEntryLevel
}

/// Minimum years required by the first experience pattern that matches.
fn minimum_years(text: &str) -> Option<u32> {
    for re in YEARS_RES.iter() {
        if let Some(caps) = re.captures(text) {
            if let Ok(n) = caps[1].parse() {
                return Some(n);
            }
        }
    }
    None
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internship_trumps_all() {
        assert_eq!(
            classify("Senior Engineering Internship", "5+ years preferred", None),
            Seniority::Internship
        );
        assert_eq!(
            classify("Developer", "", Some("Internship")),
            Seniority::Internship
        );
    }

    #[test]
    fn exact_fresher_label() {
        assert_eq!(classify("Developer", "", Some("Fresher")), Seniority::EntryLevel);
        assert_eq!(classify("Developer", "", Some(" fresher ")), Seniority::EntryLevel);
        // Not a whole-field match: falls through to the default.
        assert_eq!(
            classify("Developer", "no fresher applicants", None),
            Seniority::NonEntryLevel
        );
    }

    #[test]
    fn experience_years_override_senior_title() {
        assert_eq!(
            classify("Senior Software Engineer", "Minimum 1 year experience required", None),
            Seniority::EntryLevel
        );
    }

    #[test]
    fn experience_years_override_entry_wording() {
        assert_eq!(
            classify("Developer", "fresh graduate mindset, at least 4 years experience", None),
            Seniority::NonEntryLevel
        );
    }

    #[test]
    fn year_range_uses_minimum() {
        assert_eq!(classify("Developer", "1-3 years", None), Seniority::EntryLevel);
        assert_eq!(classify("Developer", "5-15 Years", None), Seniority::NonEntryLevel);
        assert_eq!(classify("Developer", "2 to 4 yrs", None), Seniority::NonEntryLevel);
        assert_eq!(classify("Developer", "3+ years", None), Seniority::NonEntryLevel);
    }

    #[test]
    fn senior_keywords() {
        assert_eq!(classify("Lead Developer", "", None), Seniority::NonEntryLevel);
        assert_eq!(classify("Head of Engineering", "", None), Seniority::NonEntryLevel);
    }

    #[test]
    fn entry_keywords() {
        assert_eq!(
            classify("Junior Developer wanted", "", None),
            Seniority::EntryLevel
        );
        assert_eq!(
            classify("Developer", "open to fresh graduate applicants", None),
            Seniority::EntryLevel
        );
    }

    #[test]
    fn entry_label_indicators() {
        assert_eq!(classify("Developer", "", Some("Associate")), Seniority::EntryLevel);
        assert_eq!(
            classify("Developer", "", Some("Mid-Senior level")),
            Seniority::NonEntryLevel
        );
    }

    #[test]
    fn defaults() {
        assert_eq!(classify("Developer", "", None), Seniority::NonEntryLevel);
        assert_eq!(classify("", "", None), Seniority::NotSpecified);
    }
}
