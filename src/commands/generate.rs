use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use suncal_core::{Generator, SpaEphemeris};

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::resolve;

pub fn run(config: &Config, args: GenerateArgs) -> Result<()> {
    let request = resolve::generation_request(config, &args)?;

    println!(
        "☀️  {} ({} days, {})",
        request.location.name().bold(),
        request.range.num_days(),
        request.location.timezone_id()
    );

    let output = Generator::new(SpaEphemeris)
        .generate(&request)
        .with_context(|| format!("Failed to generate calendar at {}", request.output_path.display()))?;

    for skipped in &output.skipped {
        println!(
            "   {} {}",
            format!("skipped {}", skipped.date).yellow(),
            skipped.reason.dimmed()
        );
    }

    println!(
        "{}",
        format!(
            "   Wrote {} {} to {}",
            output.event_count,
            pluralize("event", output.event_count),
            output.path.display()
        )
        .green()
    );

    Ok(())
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
