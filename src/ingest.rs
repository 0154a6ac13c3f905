use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// One captured job-detail page, as exported by the scraping side. Only the
/// identity fields are required; everything else is best-effort capture.
#[derive(Debug, Clone, Deserialize)]
pub struct FragmentInput {
    pub job_url: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub posted_phrase: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub seniority_label: Option<String>,
    pub platform: String,
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Read an NDJSON export: one fragment per line, blank lines ignored.
/// Malformed lines are skipped with a warning — one bad capture must not
/// sink the batch.
pub fn load_ndjson(path: &Path) -> Result<Vec<FragmentInput>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut fragments = Vec::new();
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<FragmentInput>(trimmed) {
            Ok(f) => fragments.push(f),
            Err(e) => warn!("Skipping malformed fragment at line {}: {}", lineno + 1, e),
        }
    }
    Ok(fragments)
}

// ── Tests ──
