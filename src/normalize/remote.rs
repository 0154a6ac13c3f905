#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOption {
    Remote,
    Hybrid,
    OnSite,
}

impl RemoteOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteOption::Remote => "Remote",
            RemoteOption::Hybrid => "Hybrid",
            RemoteOption::OnSite => "On-site",
        }
    }
}

const NEGATIVE_PHRASES: &[&str] = &[
    "not remote",
    "not wfh",
    "not work from home",
    "not a hybrid role",
    "must work in office",
    "in the office full time",
    "on-site only",
    "office based",
    "office base",
];

const REMOTE_KEYWORDS: &[&str] = &["remote", "wfh", "work from home"];

/// Classify work arrangement over title + location + description. Negative
/// phrasing is a hard override and runs first: "not remote" contains
/// "remote", so any keyword-first ordering would misfile explicitly on-site
/// postings.
pub fn classify(title: &str, location: &str, description: &str) -> RemoteOption {
    let combined = format!("{} {} {}", title, location, description).to_lowercase();

    if NEGATIVE_PHRASES.iter().any(|p| combined.contains(p)) {
        return RemoteOption::OnSite;
    }
    if combined.contains("hybrid") {
        return RemoteOption::Hybrid;
    }
    if REMOTE_KEYWORDS.iter().any(|k| combined.contains(k)) {
        return RemoteOption::Remote;
    }

    RemoteOption::OnSite
}

// ── Tests ──
