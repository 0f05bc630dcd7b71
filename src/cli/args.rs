//! Arguments shared by several subcommands

use clap::{Args, ValueEnum};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::JobscopeConfig;
use crate::filter::{FilterSpec, FlagMode};

/// Remote-work filter as offered on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WorkMode {
    #[default]
    Any,
    Remote,
    Onsite,
}

impl From<WorkMode> for FlagMode {
    fn from(mode: WorkMode) -> Self {
        match mode {
            WorkMode::Any => FlagMode::Any,
            WorkMode::Remote => FlagMode::TrueOnly,
            WorkMode::Onsite => FlagMode::FalseOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Which augmented dataset to open
#[derive(Args, Debug, Default)]
pub struct DatasetArgs {
    /// Augmented CSV to query [default: dataset.output from config]
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

impl DatasetArgs {
    pub fn path(&self, config: &JobscopeConfig) -> PathBuf {
        self.data
            .clone()
            .unwrap_or_else(|| config.dataset.output.clone())
    }
}

/// Dashboard filters. Unset flags keep the dashboard defaults.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Job title contains TEXT (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Company name contains TEXT (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub company: Option<String>,

    /// Schedule types to keep (comma-separated) [default: all]
    #[arg(long, value_name = "TYPES", value_delimiter = ',')]
    pub schedule: Option<Vec<String>>,

    /// Source platforms to keep (comma-separated)
    #[arg(long, value_name = "PLATFORMS", value_delimiter = ',')]
    pub via: Option<Vec<String>>,

    /// Locations to keep (comma-separated)
    #[arg(long, value_name = "LOCATIONS", value_delimiter = ',')]
    pub location: Option<Vec<String>>,

    /// Minimum yearly salary (0 keeps listings without salary data)
    #[arg(long, value_name = "AMOUNT", default_value_t = 0.0)]
    pub min_salary: f64,

    /// Remote or on-site listings only
    #[arg(long, value_enum, default_value_t = WorkMode::Any)]
    pub remote: WorkMode,
}

fn selection(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

impl FilterArgs {
    /// Overlay the flags that were given onto `spec`.
    pub fn apply_to(&self, spec: &mut FilterSpec) {
        if let Some(search) = &self.search {
            spec.title_query = search.clone();
        }
        if let Some(company) = &self.company {
            spec.company_query = company.clone();
        }
        if let Some(values) = &self.schedule {
            spec.schedule_types = Some(selection(values));
        }
        if let Some(values) = &self.via {
            spec.platforms = Some(selection(values));
        }
        if let Some(values) = &self.location {
            spec.locations = Some(selection(values));
        }
        spec.min_salary = self.min_salary;
        spec.work_mode = self.remote.into();
    }
}
