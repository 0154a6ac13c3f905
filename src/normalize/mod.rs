pub mod category;
pub mod dates;
pub mod employment;
pub mod fingerprint;
pub mod remote;
pub mod seniority;
pub mod tech;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::db::FragmentRow;

/// Minimum qualifications length for a fragment to be worth storing.
/// Below this the page was a stub, a login wall, or a scrape miss.
pub const MIN_QUALIFICATIONS_LEN: usize = 20;

/// Search-page leakage: a "title" containing these came from a results page,
/// not a job detail page.
const TITLE_NOISE: &[&str] = &["showing", "results", "search", "found"];

/// Fragments rejected before the gateway. Not errors — counted and logged,
/// processing continues.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("unusable title: {0:?}")]
    UnusableTitle(String),
    #[error("qualifications too short ({0} chars)")]
    ShortQualifications(usize),
}

/// Fully normalized record, assembled once per fragment and persisted or
/// discarded as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub job_url: String,
    pub employment_type: String,
    pub remote_option: String,
    pub posted_date: Option<NaiveDate>,
    pub platform: String,
    pub keyword: Option<String>,
    pub seniority_level: String,
    pub salary: Option<String>,
    pub technologies: Option<String>,
    pub qualifications: String,
    pub qualifications_hash: Option<String>,
    pub category: String,
    pub scraped_at: NaiveDateTime,
}

/// Run every classifier over one raw fragment. Pure except for the supplied
/// capture date/timestamp, so a batch can fan out across threads.
pub fn normalize(
    frag: &FragmentRow,
    today: NaiveDate,
    scraped_at: NaiveDateTime,
) -> Result<JobRecord, Rejection> {
    let title = frag.title.trim();
    let qualifications = frag.qualifications.as_deref().unwrap_or("").trim();
    let location = frag.location.as_deref().unwrap_or("Not specified").trim();

    validate_title(title)?;
    if qualifications.len() < MIN_QUALIFICATIONS_LEN {
        return Err(Rejection::ShortQualifications(qualifications.len()));
    }

    let combined = format!("{} {}", title, qualifications);

    let technologies = tech::extract(&combined);
    let category = category::categorize(title);
    let seniority =
        seniority::classify(title, qualifications, frag.seniority_label.as_deref());
    let remote = remote::classify(title, location, qualifications);
    let employment_type = frag
        .employment_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| employment::classify(&combined).to_string());

    let posted_date = frag
        .posted_phrase
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| dates::resolve(p, today));

    Ok(JobRecord {
        job_title: title.to_string(),
        company_name: frag.company.trim().to_string(),
        location: location.to_string(),
        job_url: frag.job_url.clone(),
        employment_type,
        remote_option: remote.as_str().to_string(),
        posted_date,
        platform: frag.platform.clone(),
        keyword: frag.keyword.clone(),
        seniority_level: seniority.as_str().to_string(),
        salary: frag.salary.clone(),
        technologies,
        qualifications: qualifications.to_string(),
        qualifications_hash: fingerprint::qualifications_hash(qualifications),
        category: category.to_string(),
        scraped_at,
    })
}

fn validate_title(title: &str) -> Result<(), Rejection> {
    let lower = title.to_lowercase();
    if title.is_empty()
        || title == "N/A"
        || TITLE_NOISE.iter().any(|w| lower.contains(w))
    {
        return Err(Rejection::UnusableTitle(title.to_string()));
    }
    Ok(())
}

// ── Tests ──
