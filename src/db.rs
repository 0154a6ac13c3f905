use anyhow::Result;
use rusqlite::Connection;

use crate::ingest::FragmentInput;
use crate::normalize::JobRecord;

const DB_PATH: &str = "data/jobs.sqlite";

pub fn connect() -> Result<Connection> {
    if let Some(dir) = std::path::Path::new(DB_PATH).parent() {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS raw_fragments (
            id              INTEGER PRIMARY KEY,
            job_url         TEXT UNIQUE NOT NULL,
            title           TEXT NOT NULL,
            company         TEXT NOT NULL,
            location        TEXT,
            qualifications  TEXT,
            posted_phrase   TEXT,
            salary          TEXT,
            employment_type TEXT,
            seniority_label TEXT,
            platform        TEXT NOT NULL,
            keyword         TEXT,
            captured_at     TEXT NOT NULL DEFAULT (datetime('now')),
            processed       BOOLEAN NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_fragments_processed ON raw_fragments(processed);

        CREATE TABLE IF NOT EXISTS scraped_jobs (
            id                  INTEGER PRIMARY KEY,
            job_title           TEXT NOT NULL,
            company_name        TEXT NOT NULL,
            location            TEXT,
            job_url             TEXT,
            employment_type     TEXT,
            remote_option       TEXT,
            posted_date         TEXT,
            platform            TEXT,
            keyword             TEXT,
            seniority_level     TEXT,
            salary              TEXT,
            technologies        TEXT,
            qualifications      TEXT,
            qualifications_hash TEXT,
            category            TEXT,
            scraped_at          TEXT NOT NULL DEFAULT (datetime('now'))
        );
        -- Authoritative duplicate guarantee; the gateway's lookup is an
        -- optimization and concurrent writers land here.
        CREATE UNIQUE INDEX IF NOT EXISTS idx_jobs_hash
            ON scraped_jobs(qualifications_hash)
            WHERE qualifications_hash IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_jobs_category ON scraped_jobs(category);
        CREATE INDEX IF NOT EXISTS idx_jobs_platform ON scraped_jobs(platform);
        ",
    )?;
    Ok(())
}

// ── Staging ──

pub fn insert_fragments(conn: &Connection, fragments: &[FragmentInput]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO raw_fragments
             (job_url, title, company, location, qualifications, posted_phrase,
              salary, employment_type, seniority_label, platform, keyword)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )?;
        for f in fragments {
            count += stmt.execute(rusqlite::params![
                f.job_url, f.title, f.company, f.location, f.qualifications,
                f.posted_phrase, f.salary, f.employment_type, f.seniority_label,
                f.platform, f.keyword,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub struct FragmentRow {
    pub id: i64,
    pub job_url: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub qualifications: Option<String>,
    pub posted_phrase: Option<String>,
    pub salary: Option<String>,
    pub employment_type: Option<String>,
    pub seniority_label: Option<String>,
    pub platform: String,
    pub keyword: Option<String>,
}

pub fn fetch_unprocessed(conn: &Connection, limit: Option<usize>) -> Result<Vec<FragmentRow>> {
    let sql = format!(
        "SELECT id, job_url, title, company, location, qualifications,
                posted_phrase, salary, employment_type, seniority_label,
                platform, keyword
         FROM raw_fragments WHERE processed = 0 ORDER BY id{}",
        match limit {
            Some(n) => format!(" LIMIT {}", n),
            None => String::new(),
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(FragmentRow {
                id: row.get(0)?,
                job_url: row.get(1)?,
                title: row.get(2)?,
                company: row.get(3)?,
                location: row.get(4)?,
                qualifications: row.get(5)?,
                posted_phrase: row.get(6)?,
                salary: row.get(7)?,
                employment_type: row.get(8)?,
                seniority_label: row.get(9)?,
                platform: row.get(10)?,
                keyword: row.get(11)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn mark_processed(conn: &Connection, ids: &[i64]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare("UPDATE raw_fragments SET processed = 1 WHERE id = ?1")?;
        for id in ids {
            stmt.execute(rusqlite::params![id])?;
        }
    }
    tx.commit()?;
    Ok(())
}

// ── Stored jobs ──

/// (job_title, company_name) of the stored record carrying this fingerprint.
pub fn find_by_hash(conn: &Connection, hash: &str) -> rusqlite::Result<Option<(String, String)>> {
    let mut stmt = conn.prepare(
        "SELECT job_title, company_name FROM scraped_jobs
         WHERE qualifications_hash = ?1 LIMIT 1",
    )?;
    let mut rows = stmt.query(rusqlite::params![hash])?;
    match rows.next()? {
        Some(row) => Ok(Some((row.get(0)?, row.get(1)?))),
        None => Ok(None),
    }
}

/// Plain rusqlite result so the caller can tell a UNIQUE violation (lost
/// dedup race) apart from a real storage failure.
pub fn insert_job(conn: &Connection, rec: &JobRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO scraped_jobs
         (job_title, company_name, location, job_url, employment_type,
          remote_option, posted_date, platform, keyword, seniority_level,
          salary, technologies, qualifications, qualifications_hash, category,
          scraped_at)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16)",
        rusqlite::params![
            rec.job_title,
            rec.company_name,
            rec.location,
            rec.job_url,
            rec.employment_type,
            rec.remote_option,
            rec.posted_date.map(|d| d.format("%Y-%m-%d").to_string()),
            rec.platform,
            rec.keyword,
            rec.seniority_level,
            rec.salary,
            rec.technologies,
            rec.qualifications,
            rec.qualifications_hash,
            rec.category,
            rec.scraped_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

// ── Overview ──

pub struct OverviewRow {
    pub job_title: String,
    pub company_name: String,
    pub category: String,
    pub seniority_level: String,
    pub remote_option: String,
    pub posted_date: String,
    pub platform: String,
    pub technologies: String,
}

pub fn fetch_overview(
    conn: &Connection,
    category: Option<&str>,
    platform: Option<&str>,
    limit: usize,
) -> Result<Vec<OverviewRow>> {
    let mut conditions = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(c) = category {
        conditions.push(format!("category = ?{}", params.len() + 1));
        params.push(Box::new(c.to_string()));
    }
    if let Some(p) = platform {
        conditions.push(format!("platform = ?{}", params.len() + 1));
        params.push(Box::new(p.to_string()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT job_title, company_name, COALESCE(category,''),
                COALESCE(seniority_level,''), COALESCE(remote_option,''),
                COALESCE(posted_date,''), COALESCE(platform,''),
                COALESCE(technologies,'')
         FROM scraped_jobs{}
         ORDER BY posted_date IS NULL, posted_date DESC, id
         LIMIT {}",
        where_clause, limit
    );

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(param_refs.as_slice(), |row| {
            Ok(OverviewRow {
                job_title: row.get(0)?,
                company_name: row.get(1)?,
                category: row.get(2)?,
                seniority_level: row.get(3)?,
                remote_option: row.get(4)?,
                posted_date: row.get(5)?,
                platform: row.get(6)?,
                technologies: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub fragments: usize,
    pub processed: usize,
    pub pending: usize,
    pub jobs: usize,
    pub with_technologies: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let fragments: usize =
        conn.query_row("SELECT COUNT(*) FROM raw_fragments", [], |r| r.get(0))?;
    let processed: usize = conn.query_row(
        "SELECT COUNT(*) FROM raw_fragments WHERE processed = 1",
        [],
        |r| r.get(0),
    )?;
    let jobs: usize = conn.query_row("SELECT COUNT(*) FROM scraped_jobs", [], |r| r.get(0))?;
    let with_technologies: usize = conn.query_row(
        "SELECT COUNT(*) FROM scraped_jobs WHERE technologies IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    Ok(Stats {
        fragments,
        processed,
        pending: fragments - processed,
        jobs,
        with_technologies,
    })
}
