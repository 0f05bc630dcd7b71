//! Command-line interface for jobscope
//!
//! `extract` runs the batch skill-tagging step; `query` and `explore` filter
//! the augmented dataset and report on it.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod args;
mod commands;
mod output;
mod render;

pub use output::Output;

use crate::config::JobscopeConfig;

/// jobscope - skill tags and market reports for job-listing datasets
#[derive(Parser)]
#[command(
    name = "jobscope",
    author,
    version,
    about = "Skill tag extraction and filterable reports over job-listing CSV datasets",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use a custom configuration file instead of the user and repository ones
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tag every listing of a raw dataset with the skills it mentions
    Extract(commands::extract::ExtractArgs),
    /// Filter the augmented dataset and print a dashboard report
    Query(commands::query::QueryArgs),
    /// Interactively refine filters over the augmented dataset
    Explore(commands::explore::ExploreArgs),
    /// Show the skill vocabulary or test it against some text
    Skills(commands::skills::SkillsArgs),
    /// Configuration management
    Config(commands::config::ConfigArgs),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let config = JobscopeConfig::load_with_custom_config(self.config.as_deref())?;
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Extract(args)) => commands::extract::execute(args, &config, &output),
            Some(Commands::Query(args)) => commands::query::execute(args, &config, &output),
            Some(Commands::Explore(args)) => commands::explore::execute(args, &config, &output),
            Some(Commands::Skills(args)) => commands::skills::execute(args, &config, &output),
            Some(Commands::Config(args)) => commands::config::execute(args, &config),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stderr keeps stdout free for reports
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
