//! Configuration management for jobscope
//!
//! Settings are layered with figment: embedded defaults, then user and
//! repository files, then `JOBSCOPE_*` environment variables. See `core.rs`
//! for the merge order.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::parallel::ExecutionMode;

mod core;
mod smart_load;

pub use self::core::ConfigFormat;


/// Main configuration structure for jobscope
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct JobscopeConfig {
    /// Where datasets are read from and written to
    pub dataset: DatasetConfig,

    /// Skill extraction settings
    pub extract: ExtractConfig,

    /// Report sizing
    pub report: ReportConfig,
}

/// Dataset locations and sampling
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    /// Raw dataset with a `description` column
    pub input: PathBuf,

    /// Augmented dataset with a `required_skills` column
    pub output: PathBuf,

    /// Maximum rows kept before extraction (0 disables sampling)
    pub sample_size: usize,

    /// Seed for the sampling RNG
    pub sample_seed: u64,
}

/// Skill extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractConfig {
    /// Full replacement for the built-in keyword list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vec<String>>,

    /// Keywords appended after the base list
    pub extra_keywords: Vec<String>,

    /// Processing mode
    pub mode: ExecutionMode,

    /// Maximum worker threads (0 = no limit)
    pub max_threads: usize,

    /// Percentage of CPU cores to use (1-100)
    pub thread_percentage: u8,

    /// Row count at which auto mode goes parallel
    pub min_rows_for_parallel: usize,
}

/// How many entries each report section shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub top_n: usize,
    pub platform_top_n: usize,
    pub schedule_top_n: usize,
    pub skill_top_n: usize,
    pub histogram_bins: usize,
    pub preview_rows: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("gsearch_jobs.csv"),
            output: PathBuf::from("gsearch_jobs_lite.csv"),
            sample_size: 50_000,
            sample_seed: 42,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            vocabulary: None,
            extra_keywords: vec![],
            mode: ExecutionMode::Auto,
            max_threads: 0,
            thread_percentage: 75,
            min_rows_for_parallel: 1000,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            platform_top_n: 8,
            schedule_top_n: 5,
            skill_top_n: 15,
            histogram_bins: 30,
            preview_rows: 20,
        }
    }
}
