use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "suncal", version)]
#[command(about = "Generate sunrise and sunset calendars for a location")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file (defaults to ~/.config/suncal/config.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute sunrise/sunset events and write them to an .ics file
    Generate(GenerateArgs),
    /// Print dawn, sunrise, sunset and dusk for each day without writing a file
    Preview(PreviewArgs),
    /// Create a commented default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Where to compute solar times for
#[derive(clap::Args, Default)]
pub struct LocationArgs {
    /// Location name, used as the events' LOCATION (e.g. "San Francisco")
    #[arg(long)]
    pub name: Option<String>,

    /// Region label (e.g. "USA")
    #[arg(long)]
    pub region: Option<String>,

    /// Latitude in degrees, -90 to 90
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees, -180 to 180
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// IANA timezone (e.g. "America/Los_Angeles")
    #[arg(long)]
    pub timezone: Option<String>,
}

/// Which days to compute
#[derive(clap::Args, Default)]
pub struct RangeArgs {
    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(clap::Args, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Output .ics path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Embed the date range in the output file name
    #[arg(long)]
    pub date_in_file_name: bool,

    /// Add all-day markers for DST transitions
    #[arg(long)]
    pub dst_markers: bool,

    /// How to size the sunrise/sunset windows
    #[arg(long, value_enum)]
    pub window: Option<WindowKind>,

    /// Window length in minutes for --window fixed-offset
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub offset_minutes: Option<u32>,
}

#[derive(clap::Args, Default)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub range: RangeArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Dawn to sunrise, sunset to dusk
    TwilightSpan,
    /// Sunrise/sunset plus a fixed number of minutes
    FixedOffset,
}
