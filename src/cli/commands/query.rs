use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::Output;
use crate::cli::args::{DatasetArgs, FilterArgs, ReportFormat};
use crate::cli::render;
use crate::config::JobscopeConfig;
use crate::filter::{FilterEngine, FilterSpec};
use crate::report::DashboardReport;
use crate::table::{SharedTable, write_job_table};

#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Also write the filtered listings to FILE
    #[arg(short, long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

pub fn execute(args: QueryArgs, config: &JobscopeConfig, output: &Output) -> Result<()> {
    let shared = SharedTable::new(args.dataset.path(config));
    let table = shared.get()?;
    let engine = FilterEngine::new(&table);

    let mut spec = FilterSpec::dashboard_defaults(&table);
    args.filters.apply_to(&mut spec);
    let view = engine.filter(&spec);
    tracing::info!("{} of {} listings match", view.len(), table.len());

    let report = DashboardReport::build(&view, &spec, &config.report);
    render::render(&report, args.format, output)?;

    if let Some(path) = &args.export {
        write_job_table(path, table.schema(), view.iter())?;
        output.notice(&format!("Exported {} listings to {}", view.len(), path.display()));
    }

    Ok(())
}
