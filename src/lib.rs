//! # jobscope - skill tags and market reports for job-listing datasets
//!
//! Two independent pieces do the work:
//!
//! - **Skill extraction** ([`extractor`]): a whole-word keyword scan over each
//!   listing's description, run once as a batch step that writes a lighter
//!   dataset carrying `required_skills` instead of the free text.
//! - **Filtering** ([`filter`]): conjunctions of text, categorical, numeric
//!   and boolean predicates over the augmented dataset, plus the aggregates
//!   (top-N counts, mode, salary summary, histogram, skill ranking) that
//!   [`report`] assembles into a dashboard.
//!
//! ## Quick Start
//!
//! ```bash
//! # Tag a raw export and write gsearch_jobs_lite.csv
//! jobscope extract --input gsearch_jobs.csv
//!
//! # Remote analyst roles paying at least 90k, as JSON
//! jobscope query --search analyst --remote remote --min-salary 90000 --format json
//!
//! # Refine filters interactively
//! jobscope explore
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod parallel;
pub mod report;
pub mod table;

pub use cli::{Cli, Output};
pub use config::JobscopeConfig;

/// Result type alias for jobscope operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
