use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{ConfigFormat, JobscopeConfig};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the merged configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

pub fn execute(args: ConfigArgs, config: &JobscopeConfig) -> Result<()> {
    match args.command {
        ConfigCommand::Show { format } => {
            print!("{}", config.export(format)?);
            if format == ConfigFormat::Json {
                println!();
            }
        }
    }
    Ok(())
}
