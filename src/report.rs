//! Dashboard report assembled from the aggregates of one filtered view.
//!
//! The report is plain data; the CLI renders it as styled text or JSON.
//! Sections without data are `None` (or empty) and serialize as `null`.

use serde::Serialize;

use crate::config::ReportConfig;
use crate::filter::aggregate::{self, Count, FlagSplit, Histogram, NumericSummary};
use crate::filter::{FilterSpec, View};
use crate::table::{Column, JobListing};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_listings: usize,
    /// Percentage of listings that are remote
    pub remote_share_pct: Option<f64>,
    pub top_platform: Option<String>,
    pub distinct_companies: Option<usize>,
    pub average_salary: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub filters: FilterSpec,
    pub overview: Overview,
    pub top_locations: Vec<Count>,
    pub top_companies: Vec<Count>,
    pub platforms: Vec<Count>,
    pub work_mode: Option<FlagSplit>,
    pub schedule_types: Vec<Count>,
    pub top_skills: Vec<Count>,
    pub salary: Option<NumericSummary>,
    pub salary_histogram: Option<Histogram>,
    pub preview: Vec<JobListing>,
}

impl DashboardReport {
    pub fn build(view: &View, filters: &FilterSpec, config: &ReportConfig) -> Self {
        let salary = aggregate::salary_summary(view);

        let overview = Overview {
            total_listings: view.len(),
            remote_share_pct: aggregate::flag_share(view, Column::WorkFromHome).map(|s| s * 100.0),
            top_platform: aggregate::mode(view, Column::Via),
            distinct_companies: aggregate::distinct_count(view, Column::CompanyName),
            average_salary: salary.as_ref().map(|s| s.mean),
        };

        Self {
            filters: filters.clone(),
            overview,
            top_locations: aggregate::top_n(view, Column::Location, config.top_n),
            top_companies: aggregate::top_n(view, Column::CompanyName, config.top_n),
            platforms: aggregate::top_n(view, Column::Via, config.platform_top_n),
            work_mode: aggregate::flag_split(view, Column::WorkFromHome),
            schedule_types: aggregate::top_n(view, Column::ScheduleType, config.schedule_top_n),
            top_skills: aggregate::skill_frequency(view, config.skill_top_n),
            salary,
            salary_histogram: aggregate::salary_histogram(view, config.histogram_bins),
            preview: view.iter().take(config.preview_rows).cloned().collect(),
        }
    }
}
