use anyhow::Result;
use std::time::Instant;

use super::core::SkillExtractor;
use super::types::{ExtractionResult, ExtractionStats};
use crate::parallel::ExecutionStrategy;
use crate::table::{JobListing, RawTable};

/// Run the extractor over every row of a raw table.
///
/// Rows are independent, so the strategy only changes how the work is spread
/// out; the augmented rows come back in input order either way.
pub fn extract_table<P>(
    extractor: &SkillExtractor,
    table: RawTable,
    strategy: &ExecutionStrategy,
    progress_reporter: Option<P>,
) -> Result<ExtractionResult>
where
    P: Fn(usize, usize) + Send + Sync,
{
    let start_time = Instant::now();
    let rows_read = table.rows_read();
    let RawTable {
        schema,
        rows,
        skipped_rows,
        sampled_out,
    } = table;

    let mut stats = ExtractionStats {
        rows_read,
        rows_skipped: skipped_rows,
        rows_sampled_out: sampled_out,
        rows_processed: rows.len(),
        rows_without_description: rows.iter().filter(|r| r.description.is_none()).count(),
        ..Default::default()
    };

    tracing::info!(
        "Extracting skills from {} rows ({:?})",
        rows.len(),
        strategy
    );

    let listings: Vec<JobListing> = strategy.execute(
        rows,
        |row| {
            let skills = extractor.extract(row.description.as_deref());
            row.into_listing(skills)
        },
        progress_reporter,
    )?;

    stats.rows_with_skills = listings
        .iter()
        .filter(|l| !l.required_skills.is_empty())
        .count();
    stats.total_tags = listings.iter().map(|l| l.required_skills.len()).sum();
    stats.duration_ms = start_time.elapsed().as_millis() as u64;

    tracing::info!(
        "Tagged {} of {} rows with {} skills in {}ms",
        stats.rows_with_skills,
        stats.rows_processed,
        stats.total_tags,
        stats.duration_ms
    );

    Ok(ExtractionResult {
        schema: schema.after_extraction(),
        listings,
        stats,
    })
}
