use serde::Serialize;

use crate::table::{JobListing, Schema};

/// Statistics from an extraction run
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ExtractionStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_sampled_out: usize,
    pub rows_processed: usize,
    pub rows_without_description: usize,
    pub rows_with_skills: usize,
    pub total_tags: usize,
    pub duration_ms: u64,
}

/// Result of an extraction run: the augmented rows plus what happened.
#[derive(Debug)]
pub struct ExtractionResult {
    pub schema: Schema,
    pub listings: Vec<JobListing>,
    pub stats: ExtractionStats,
}
