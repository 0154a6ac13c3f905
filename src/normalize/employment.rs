/// Employment-type fallback for boards that don't expose a structured field.
/// First keyword hit wins; postings that never say are "Not specified".
pub fn classify(text: &str) -> &'static str {
    let t = text.to_lowercase();
    if t.contains("full time") || t.contains("full-time") {
        "Full-time"
    } else if t.contains("part time") || t.contains("part-time") {
        "Part-time"
    } else if t.contains("contract") {
        "Contract"
    } else if t.contains("freelance") {
        "Freelance"
    } else if t.contains("internship") {
        "Internship"
    } else {
        "Not specified"
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_order() {
        assert_eq!(classify("Full-time position"), "Full-time");
        assert_eq!(classify("part time, flexible"), "Part-time");
        assert_eq!(classify("6-month contract"), "Contract");
        assert_eq!(classify("freelance gig"), "Freelance");
        assert_eq!(classify("summer internship"), "Internship");
    }

    #[test]
    fn full_time_beats_contract() {
        assert_eq!(classify("full-time contract role"), "Full-time");
    }

    #[test]
    fn silent_posting() {
        assert_eq!(classify("Software Engineer, Manila"), "Not specified");
    }
}
