/// Content fingerprint for duplicate detection: md5 of the trimmed
/// qualifications text as lowercase hex. Empty text has no fingerprint —
/// hashing "" would collapse every description-less posting into one
/// duplicate bucket.
pub fn qualifications_hash(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("{:x}", md5::compute(trimmed.as_bytes())))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = qualifications_hash("5+ years building REST APIs in Java.");
        let b = qualifications_hash("5+ years building REST APIs in Java.");
        assert_eq!(a, b);
        assert_eq!(a.unwrap().len(), 32);
    }

    #[test]
    fn distinct_texts_distinct_hashes() {
        let a = qualifications_hash("Strong SQL and reporting background.");
        let b = qualifications_hash("Strong SQL and reporting experience.");
        assert_ne!(a, b);
    }

    #[test]
    fn whitespace_trimmed_before_hashing() {
        assert_eq!(
            qualifications_hash("  text body  "),
            qualifications_hash("text body"),
        );
    }

    #[test]
    fn empty_has_no_fingerprint() {
        assert_eq!(qualifications_hash(""), None);
        assert_eq!(qualifications_hash("   "), None);
    }
}
