use std::collections::HashSet;

use anyhow::Result;
use rusqlite::Connection;

use crate::db;
use crate::normalize::JobRecord;

/// In-run duplicate tracking. Owned by the caller for the lifetime of one
/// batch and passed in explicitly, so repeated or concurrent runs never
/// share ambient state.
#[derive(Debug, Default)]
pub struct RunCache {
    seen_urls: HashSet<String>,
    seen_hashes: HashSet<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PersistOutcome {
    Inserted,
    /// Same URL already handled earlier in this run.
    DuplicateUrl,
    /// A stored record already carries this fingerprint.
    Duplicate {
        original_title: String,
        original_company: String,
    },
}

/// Insert the record unless its fingerprint is already stored. First writer
/// wins: a fingerprint hit means the new record is discarded, never merged,
/// and the skip cites the stored record.
///
/// The lookup here is an optimization (it avoids the insert attempt and
/// names the original for the log); the UNIQUE index on the hash column is
/// what actually guarantees at-most-one-per-fingerprint. A concurrent writer
/// that wins the race surfaces as a constraint violation, which is reported
/// as a duplicate, not a failure.
pub fn persist(
    conn: &Connection,
    rec: &JobRecord,
    cache: &mut RunCache,
) -> Result<PersistOutcome> {
    if !cache.seen_urls.insert(rec.job_url.clone()) {
        return Ok(PersistOutcome::DuplicateUrl);
    }

    if let Some(hash) = &rec.qualifications_hash {
        if cache.seen_hashes.contains(hash) || db::find_by_hash(conn, hash)?.is_some() {
            return duplicate_of(conn, hash);
        }
    }

    match db::insert_job(conn, rec) {
        Ok(()) => {
            if let Some(hash) = &rec.qualifications_hash {
                cache.seen_hashes.insert(hash.clone());
            }
            Ok(PersistOutcome::Inserted)
        }
        Err(e) if is_unique_violation(&e) => {
            match &rec.qualifications_hash {
                Some(hash) => duplicate_of(conn, hash),
                None => Err(e.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}

fn duplicate_of(conn: &Connection, hash: &str) -> Result<PersistOutcome> {
    let (original_title, original_company) =
        db::find_by_hash(conn, hash)?.unwrap_or_default();
    Ok(PersistOutcome::Duplicate {
        original_title,
        original_company,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FragmentRow;
    use crate::normalize;
    use chrono::NaiveDate;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        conn
    }

    fn fragment(id: i64, url: &str, title: &str, company: &str, quals: &str) -> FragmentRow {
        FragmentRow {
            id,
            job_url: url.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: Some("Manila".into()),
            qualifications: Some(quals.to_string()),
            posted_phrase: None,
            salary: None,
            employment_type: None,
            seniority_label: None,
            platform: "Indeed".into(),
            keyword: Some("software developer".into()),
        }
    }

    fn record(frag: &FragmentRow) -> JobRecord {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        normalize::normalize(frag, today, today.and_hms_opt(8, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn inserts_then_rejects_same_qualifications() {
        let conn = conn();
        let mut cache = RunCache::default();
        let quals = "Build and maintain internal web tools with modern frameworks.";

        let first = record(&fragment(1, "https://a/jobs/1", "Web Developer", "Acme", quals));
        assert_eq!(persist(&conn, &first, &mut cache).unwrap(), PersistOutcome::Inserted);

        // Different title/company, identical qualifications: rejected,
        // citing the stored record.
        let second = record(&fragment(2, "https://b/jobs/9", "Frontend Dev", "Beta Inc", quals));
        match persist(&conn, &second, &mut cache).unwrap() {
            PersistOutcome::Duplicate {
                original_title,
                original_company,
            } => {
                assert_eq!(original_title, "Web Developer");
                assert_eq!(original_company, "Acme");
            }
            other => panic!("expected duplicate, got {:?}", other),
        }
    }

    #[test]
    fn different_qualifications_both_accepted() {
        let conn = conn();
        let mut cache = RunCache::default();

        let a = record(&fragment(
            1, "https://a/jobs/1", "Web Developer", "Acme",
            "Build and maintain internal web tools with modern frameworks.",
        ));
        let b = record(&fragment(
            2, "https://a/jobs/2", "Web Developer", "Acme",
            "Operate and extend the public storefront and checkout flows.",
        ));
        assert_eq!(persist(&conn, &a, &mut cache).unwrap(), PersistOutcome::Inserted);
        assert_eq!(persist(&conn, &b, &mut cache).unwrap(), PersistOutcome::Inserted);
    }

    #[test]
    fn same_url_skipped_within_run() {
        let conn = conn();
        let mut cache = RunCache::default();

        let a = record(&fragment(
            1, "https://a/jobs/1", "Web Developer", "Acme",
            "Build and maintain internal web tools with modern frameworks.",
        ));
        assert_eq!(persist(&conn, &a, &mut cache).unwrap(), PersistOutcome::Inserted);
        assert_eq!(
            persist(&conn, &a, &mut cache).unwrap(),
            PersistOutcome::DuplicateUrl
        );
    }

    #[test]
    fn duplicate_survives_fresh_cache() {
        // Stored-state dedup must hold even when the run cache is new
        // (separate process, later run).
        let conn = conn();
        let quals = "Administer PostgreSQL clusters and own backup procedures.";

        let a = record(&fragment(1, "https://a/jobs/1", "DBA", "Acme", quals));
        persist(&conn, &a, &mut RunCache::default()).unwrap();

        let b = record(&fragment(2, "https://b/jobs/2", "Database Admin", "Beta", quals));
        match persist(&conn, &b, &mut RunCache::default()).unwrap() {
            PersistOutcome::Duplicate { original_title, .. } => {
                assert_eq!(original_title, "DBA");
            }
            other => panic!("expected duplicate, got {:?}", other),
        }
    }
}
