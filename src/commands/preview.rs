use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use owo_colors::OwoColorize;
use suncal_core::{DaySolarTimes, SolarEphemeris, SpaEphemeris};

use crate::cli::PreviewArgs;
use crate::config::Config;
use crate::resolve;

pub fn run(config: &Config, args: PreviewArgs) -> Result<()> {
    let location = resolve::location(config, &args.location)?;
    let range = resolve::range(config, &args.range)?;

    println!(
        "{}",
        format!("{} ({})", location.name(), location.timezone_id()).bold()
    );

    for date in range.days() {
        let label = date.format("%a %b %-d %Y").to_string();
        match SpaEphemeris.solar_times(&location, date) {
            Ok(times) => println!("  {:<16} {}", label, format_times(&times)),
            Err(e) => println!("  {:<16} {}", label, e.to_string().dimmed()),
        }
    }

    Ok(())
}

/// e.g. "dawn 05:22  sunrise 05:52  sunset 20:35  dusk 21:05"
fn format_times(times: &DaySolarTimes) -> String {
    let twilight = |t: Option<DateTime<Tz>>| {
        t.map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string())
    };
    format!(
        "dawn {}  sunrise {}  sunset {}  dusk {}",
        twilight(times.dawn),
        times.sunrise.format("%H:%M"),
        times.sunset.format("%H:%M"),
        twilight(times.dusk),
    )
}
