use anyhow::Result;
use clap::Parser;

use jobscope::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
