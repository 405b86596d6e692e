use anyhow::Result;
use clap::{Parser, Subcommand};
use otter_date_intrinsics::GlobalData;
use otter_datemath::{FixedOffsetPlatform, SystemPlatform, TimePlatform, ZonedPlatform};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::filter::EnvFilter;

mod commands;
mod config;

use commands::{
    clip::ClipCommand, decompose::DecomposeCommand, format::FormatCommand, lookup::LookupCommand,
    parse::ParseCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "otter-date", version, about = "Inspect how Otter computes JavaScript dates")]
struct Cli {
    /// Config file (default: otter-date.toml in this or a parent directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fixed UTC offset in minutes, instead of the host time zone
    #[arg(long, global = true, allow_hyphen_values = true)]
    offset: Option<i32>,

    /// IANA time zone such as Europe/Berlin, instead of the host time zone
    #[arg(long, global = true, conflicts_with = "offset")]
    zone: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a date string like Date.parse
    Parse(ParseCommand),
    /// Break a time value into calendar fields
    Decompose(DecomposeCommand),
    /// Apply TimeClip to a number
    Clip(ClipCommand),
    /// Format a time value like Date.prototype.toString
    Format(FormatCommand),
    /// Query a built-in static property table
    Lookup(LookupCommand),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    let global = build_runtime(&config, cli.offset, cli.zone.as_deref())?;

    let output = match &cli.command {
        Commands::Parse(command) => command.execute(&global)?,
        Commands::Decompose(command) => command.execute(&global)?,
        Commands::Clip(command) => command.execute()?,
        Commands::Format(command) => command.execute(&global)?,
        Commands::Lookup(command) => command.execute(&global)?,
    };

    println!("{}", output);
    Ok(())
}

/// Where local times are computed, command line first.
#[derive(Debug, PartialEq)]
enum ZoneChoice<'a> {
    Offset(i32),
    Named(&'a str),
    Host,
}

fn zone_choice<'a>(config: &'a Config, offset_minutes: Option<i32>, zone: Option<&'a str>) -> ZoneChoice<'a> {
    match (offset_minutes, zone) {
        (Some(minutes), _) => ZoneChoice::Offset(minutes),
        (None, Some(id)) => ZoneChoice::Named(id),
        (None, None) => match (config.zone.offset_minutes, config.zone.id.as_deref()) {
            (Some(minutes), _) => ZoneChoice::Offset(minutes),
            (None, Some(id)) => ZoneChoice::Named(id),
            (None, None) => ZoneChoice::Host,
        },
    }
}

fn build_runtime(config: &Config, offset_minutes: Option<i32>, zone: Option<&str>) -> Result<GlobalData> {
    let platform: Arc<dyn TimePlatform> = match zone_choice(config, offset_minutes, zone) {
        ZoneChoice::Offset(minutes) => {
            let mut platform = FixedOffsetPlatform::new(config::offset_seconds(minutes)?);
            if let Some(name) = &config.zone.name {
                platform = platform.with_zone_name(name.clone());
            }
            Arc::new(platform)
        }
        ZoneChoice::Named(id) => Arc::new(ZonedPlatform::from_name(id)?),
        ZoneChoice::Host => Arc::new(SystemPlatform::new()),
    };

    Ok(GlobalData::with_config(platform, config.date.clone())?)
}
