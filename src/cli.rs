use std::path::PathBuf;
use std::process::{Command as ProcessCommand, ExitStatus};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, info};

use tickwatch_config::{DisplayUnit, Precision, RejectedVar, WatchConfig};
use tickwatch_core::{Scalar, Stopwatch};
use utils::format_elapsed;

#[derive(Debug, Parser)]
#[command(
    name = "tickwatch",
    version,
    about = "Time a command or a sleep with a monotonic stopwatch"
)]
pub struct Cli {
    /// Read settings from a TOML file (needs the `toml-config` feature)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Scalar precision for elapsed seconds: single or double
    #[arg(long, global = true)]
    pub precision: Option<Precision>,

    /// Display unit: s, ms, us or ns
    #[arg(long, global = true)]
    pub unit: Option<DisplayUnit>,

    /// Digits after the decimal point (at most 18)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=18))]
    pub decimals: Option<u8>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a program and report how long it took
    Exec {
        program: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Sleep for the given number of milliseconds and report the measured time
    Sleep { millis: u64 },
}

impl Cli {
    /// Settings from file, then environment, then command-line flags.
    ///
    /// Rejected environment values are returned so they can be logged once
    /// the subscriber is installed.
    pub fn resolve_config(&self) -> Result<(WatchConfig, Vec<RejectedVar>)> {
        let base = match &self.config {
            Some(path) => WatchConfig::from_file(path)
                .with_context(|| format!("could not load {}", path.display()))?,
            None => WatchConfig::default(),
        };
        let (config, rejected) = base.merge_with_env_collecting();
        Ok((self.apply_overrides(config), rejected))
    }

    fn apply_overrides(&self, mut config: WatchConfig) -> WatchConfig {
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if let Some(decimals) = self.decimals {
            config.decimals = usize::from(decimals);
        }
        config
    }
}

/// What a timed command produced besides the measurement.
#[derive(Debug)]
pub struct Report {
    pub seconds: f64,
    pub status: Option<ExitStatus>,
}

impl Report {
    /// Exit code to hand back to the shell, if the timed program failed.
    pub fn failure_code(&self) -> Option<i32> {
        let status = self.status?;
        if status.success() {
            None
        } else {
            Some(status.code().unwrap_or(1))
        }
    }
}

pub fn run(command: &Command, config: &WatchConfig) -> Result<Report> {
    match config.precision {
        Precision::Single => timed::<f32>(command),
        Precision::Double => timed::<f64>(command),
    }
}

fn timed<S: Scalar>(command: &Command) -> Result<Report> {
    let mut watch: Stopwatch<S> = Stopwatch::new();

    let status = match command {
        Command::Exec { program, args } => {
            debug!(%program, ?args, "spawning");
            let status = watch.measure(|| ProcessCommand::new(program).args(args).status());
            Some(status.with_context(|| format!("failed to run `{program}`"))?)
        }
        Command::Sleep { millis } => {
            watch.measure(|| thread::sleep(Duration::from_millis(*millis)));
            None
        }
    };

    let elapsed = watch.try_elapsed_time()?;
    Ok(Report {
        seconds: elapsed.to_f64(),
        status,
    })
}

pub fn print_report(report: &Report, config: &WatchConfig) {
    let rendered = format_elapsed(report.seconds, config.unit, config.decimals);
    println!("{} {}", "elapsed:".green().bold(), rendered);

    if let Some(status) = report.status {
        let line = format!("status: {status}");
        if status.success() {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line.red());
        }
    }

    info!(
        precision = %config.precision,
        seconds = report.seconds,
        "measurement complete"
    );
}
