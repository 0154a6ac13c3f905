mod db;
mod gateway;
mod ingest;
mod normalize;

use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "job_pipeline", about = "Job-board fragment normalizer and dedup pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    Init,
    /// Load raw fragments from an NDJSON export into the staging table
    Ingest {
        /// NDJSON file, one captured fragment per line
        file: PathBuf,
    },
    /// Normalize staged fragments and persist deduplicated records
    Process {
        /// Max fragments to process (default: all pending)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Ingest + process in one pipeline
    Run {
        /// NDJSON file, one captured fragment per line
        file: PathBuf,
        /// Max fragments to process
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show pipeline statistics
    Stats,
    /// Stored jobs overview table
    Overview {
        /// Filter by category (e.g. "Cloud Computing")
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by source platform (e.g. "JobStreet")
        #[arg(short, long)]
        platform: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            println!("Schema ready.");
            Ok(())
        }
        Commands::Ingest { file } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let fragments = ingest::load_ndjson(&file)?;
            let inserted = db::insert_fragments(&conn, &fragments)?;
            println!(
                "Staged {} new fragments ({} in file).",
                inserted,
                fragments.len()
            );
            Ok(())
        }
        Commands::Process { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let fragments = db::fetch_unprocessed(&conn, limit)?;
            if fragments.is_empty() {
                println!("No pending fragments. Run 'ingest' first.");
                return Ok(());
            }
            println!("Processing {} fragments...", fragments.len());
            let counts = process_fragments(&conn, &fragments)?;
            counts.print();
            Ok(())
        }
        Commands::Run { file, limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;

            // Phase 1: Stage
            let fragments = ingest::load_ndjson(&file)?;
            let inserted = db::insert_fragments(&conn, &fragments)?;
            println!(
                "Staged {} new fragments ({} in file).",
                inserted,
                fragments.len()
            );

            // Phase 2: Process
            let t_process = Instant::now();
            let pending = db::fetch_unprocessed(&conn, limit)?;
            if pending.is_empty() {
                println!("Nothing to process.");
                return Ok(());
            }
            println!("Processing {} fragments...", pending.len());
            let counts = process_fragments(&conn, &pending)?;
            println!("Processed in {:.1}s", t_process.elapsed().as_secs_f64());
            counts.print();
            Ok(())
        }
        Commands::Overview {
            category,
            platform,
            limit,
        } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let rows =
                db::fetch_overview(&conn, category.as_deref(), platform.as_deref(), limit)?;
            if rows.is_empty() {
                println!("No stored jobs found.");
                return Ok(());
            }

            // Compact, readable table
            println!(
                "{:>3} | {:<32} | {:<20} | {:<28} | {:<15} | {:<7} | {:<10} | {:<9}",
                "#", "Title", "Company", "Category", "Seniority", "Remote", "Posted", "Platform"
            );
            println!("{}", "-".repeat(140));

            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<32} | {:<20} | {:<28} | {:<15} | {:<7} | {:<10} | {:<9}",
                    i + 1,
                    truncate(&r.job_title, 32),
                    truncate(&r.company_name, 20),
                    truncate(&r.category, 28),
                    truncate(&r.seniority_level, 15),
                    truncate(&r.remote_option, 7),
                    r.posted_date,
                    truncate(&r.platform, 9),
                );
            }

            // Technologies summary (separate section to avoid clutter)
            let with_tech: Vec<_> = rows.iter().filter(|r| !r.technologies.is_empty()).collect();
            if !with_tech.is_empty() {
                println!("\n--- Technologies ---");
                for r in &with_tech {
                    println!("  {}: {}", truncate(&r.job_title, 32), r.technologies);
                }
            }

            println!("\n{} jobs", rows.len());
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Fragments: {}", s.fragments);
            println!("Processed: {}", s.processed);
            println!("Pending:   {}", s.pending);
            println!("Stored:    {}", s.jobs);
            println!("With tech: {}", s.with_technologies);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

struct ProcessCounts {
    saved: usize,
    duplicates: usize,
    rejected: usize,
    errors: usize,
}

impl ProcessCounts {
    fn print(&self) {
        println!(
            "Saved {} jobs, {} duplicates skipped, {} rejected, {} errors.",
            self.saved, self.duplicates, self.rejected, self.errors,
        );
    }
}

fn process_fragments(
    conn: &rusqlite::Connection,
    fragments: &[db::FragmentRow],
) -> anyhow::Result<ProcessCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(fragments.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let today = Local::now().date_naive();
    let scraped_at = Local::now().naive_local();

    let mut counts = ProcessCounts {
        saved: 0,
        duplicates: 0,
        rejected: 0,
        errors: 0,
    };
    let mut cache = gateway::RunCache::default();

    for chunk in fragments.chunks(500) {
        // Normalization is pure; persistence stays on this thread.
        let results: Vec<_> = chunk
            .par_iter()
            .map(|frag| (frag.id, normalize::normalize(frag, today, scraped_at)))
            .collect();

        let mut done_ids = Vec::with_capacity(results.len());

        for (frag_id, result) in results {
            match result {
                Ok(record) => match gateway::persist(conn, &record, &mut cache) {
                    Ok(gateway::PersistOutcome::Inserted) => {
                        counts.saved += 1;
                        done_ids.push(frag_id);
                    }
                    Ok(gateway::PersistOutcome::Duplicate {
                        original_title,
                        original_company,
                    }) => {
                        info!(
                            "Duplicate skipped: {} at {} (original: {} at {})",
                            record.job_title, record.company_name,
                            original_title, original_company,
                        );
                        counts.duplicates += 1;
                        done_ids.push(frag_id);
                    }
                    Ok(gateway::PersistOutcome::DuplicateUrl) => {
                        counts.duplicates += 1;
                        done_ids.push(frag_id);
                    }
                    // Storage failure: report, leave the fragment pending,
                    // keep going with the rest of the batch.
                    Err(e) => {
                        warn!("Persist failed for fragment {}: {}", frag_id, e);
                        counts.errors += 1;
                    }
                },
                Err(rejection) => {
                    info!("Fragment {} rejected: {}", frag_id, rejection);
                    counts.rejected += 1;
                    done_ids.push(frag_id);
                }
            }
        }

        db::mark_processed(conn, &done_ids)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
