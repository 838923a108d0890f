use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::Config;

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::config_path()?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}\n\
            Pass --force to overwrite it.",
            path.display()
        );
    }

    Config::create_default_config(&path)?;

    println!("{}", format!("  Created: {}", path.display()).green());
    println!("  Fill in [location] and [range], then run `suncal generate`.");

    Ok(())
}
