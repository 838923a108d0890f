//! Merge config file values and command-line flags into core types.
//!
//! Flags win over the config file. Location and range have no defaults.

use std::path::PathBuf;

use anyhow::Result;
use suncal_core::output::derive_output_path;
use suncal_core::{DateRange, GenerationRequest, Location, WindowMode};

use crate::cli::{GenerateArgs, LocationArgs, RangeArgs, WindowKind};
use crate::config::{Config, DEFAULT_OFFSET_MINUTES, DEFAULT_OUTPUT_PATH};

fn required<T>(value: Option<T>, flag: &str, key: &str) -> Result<T> {
    value.ok_or_else(|| {
        anyhow::anyhow!("Missing {flag}. Pass {flag} or set {key} in the config file")
    })
}

pub fn location(config: &Config, args: &LocationArgs) -> Result<Location> {
    let cfg = &config.location;

    let name = required(
        args.name.clone().or_else(|| cfg.name.clone()),
        "--name",
        "[location] name",
    )?;
    let latitude = required(args.lat.or(cfg.latitude), "--lat", "[location] latitude")?;
    let longitude = required(args.lon.or(cfg.longitude), "--lon", "[location] longitude")?;
    let timezone = required(
        args.timezone.clone().or_else(|| cfg.timezone.clone()),
        "--timezone",
        "[location] timezone",
    )?;
    let region = args
        .region
        .clone()
        .or_else(|| cfg.region.clone())
        .unwrap_or_default();

    Ok(Location::new(name, region, latitude, longitude, &timezone)?)
}

pub fn range(config: &Config, args: &RangeArgs) -> Result<DateRange> {
    let start = required(
        args.start.as_deref().or(config.range.start.as_deref()),
        "--start",
        "[range] start",
    )?;
    let end = required(
        args.end.as_deref().or(config.range.end.as_deref()),
        "--end",
        "[range] end",
    )?;

    Ok(DateRange::from_args(start, end)?)
}

pub fn window_mode(config: &Config, args: &GenerateArgs) -> WindowMode {
    let kind = args
        .window
        .or(config.events.window)
        .unwrap_or(WindowKind::TwilightSpan);

    match kind {
        WindowKind::TwilightSpan => WindowMode::TwilightSpan,
        WindowKind::FixedOffset => WindowMode::FixedOffset {
            minutes: args
                .offset_minutes
                .or(config.events.offset_minutes)
                .unwrap_or(DEFAULT_OFFSET_MINUTES),
        },
    }
}

pub fn generation_request(config: &Config, args: &GenerateArgs) -> Result<GenerationRequest> {
    let location = location(config, &args.location)?;
    let range = range(config, &args.range)?;

    let base_path = args
        .output
        .clone()
        .or_else(|| config.output.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    let date_in_file_name =
        args.date_in_file_name || config.output.date_in_file_name.unwrap_or(false);

    Ok(GenerationRequest {
        location,
        range,
        include_dst_markers: args.dst_markers || config.events.dst_markers.unwrap_or(false),
        window_mode: window_mode(config, args),
        output_path: derive_output_path(&base_path, &range, date_in_file_name),
    })
}
