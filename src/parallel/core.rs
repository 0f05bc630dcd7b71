use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// How often (in items) progress is reported.
const PROGRESS_INTERVAL: usize = 64;

/// User-facing choice of processing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Always process rows one after another
    Sequential,
    /// Always spread rows over a worker pool
    Parallel,
    /// Go parallel once the row count passes a threshold
    #[default]
    Auto,
}

/// Resolved execution strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    /// Resolve a configured mode against a concrete workload.
    pub fn for_mode(
        mode: ExecutionMode,
        work_items_count: usize,
        min_items_for_parallel: usize,
        max_threads_config: usize,
        thread_percentage: u8,
    ) -> Self {
        let workers = Self::calculate_optimal_workers(max_threads_config, thread_percentage);
        match mode {
            ExecutionMode::Sequential => ExecutionStrategy::Sequential,
            ExecutionMode::Parallel => ExecutionStrategy::Parallel { workers },
            ExecutionMode::Auto => Self::auto(work_items_count, min_items_for_parallel, workers),
        }
    }

    /// Threshold decision only; worker sizing is the caller's job.
    pub fn auto(
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        if work_items_count >= min_items_for_parallel && optimal_workers > 1 {
            ExecutionStrategy::Parallel {
                workers: optimal_workers,
            }
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Workers available given CPU count and configuration.
    ///
    /// ```text
    /// cores * thread_percentage / 100, capped by max_threads_config when > 0,
    /// never below 1
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();
        let percentage = thread_percentage.clamp(1, 100) as usize;
        let workers_by_percentage = std::cmp::max(1, (available_cores * percentage) / 100);

        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }

    /// Apply `processor` to every item. Output order always matches input order.
    ///
    /// `progress_reporter` receives `(completed, total)`.
    pub fn execute<T, R, F, P>(
        &self,
        work_items: Vec<T>,
        processor: F,
        progress_reporter: Option<P>,
    ) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
        P: Fn(usize, usize) + Send + Sync,
    {
        let total = work_items.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let completed = AtomicUsize::new(0);
        let tick = |_: &R| {
            let current = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(reporter) = &progress_reporter
                && (current % PROGRESS_INTERVAL == 0 || current == total)
            {
                reporter(current, total);
            }
        };

        match self {
            ExecutionStrategy::Sequential => Ok(work_items
                .into_iter()
                .map(&processor)
                .inspect(tick)
                .collect()),
            ExecutionStrategy::Parallel { workers } => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(std::cmp::min(*workers, total).max(1))
                    .thread_name(|i| format!("jobscope-worker-{i}"))
                    .build()
                    .context("Failed to build worker pool")?;

                Ok(pool.install(|| {
                    work_items
                        .into_par_iter()
                        .map(&processor)
                        .inspect(tick)
                        .collect()
                }))
            }
        }
    }
}
