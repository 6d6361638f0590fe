mod cli;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, rejected) = cli.resolve_config()?;
    utils::init_logging(&config.log_filter);
    for var in &rejected {
        var.log();
    }

    let report = cli::run(&cli.command, &config)?;
    cli::print_report(&report, &config);

    if let Some(code) = report.failure_code() {
        std::process::exit(code);
    }
    Ok(())
}
