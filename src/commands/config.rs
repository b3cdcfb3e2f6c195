use crate::core::Config;
use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

pub fn execute(matches: &ArgMatches, config: &Config) -> Result<()> {
    let config_path = Config::get_config_path()?;

    if matches.get_flag("path") {
        println!("{}", config_path.display());
        return Ok(());
    }

    if matches.get_flag("init") {
        if config_path.exists() {
            println!(
                "{} {}",
                "Config file already exists:".yellow(),
                config_path.display()
            );
        } else {
            config.save_to(&config_path)?;
            println!("{} {}", "✓ Wrote".green(), config_path.display());
        }
        return Ok(());
    }

    let rendered =
        serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", format!("# {}", config_path.display()).dimmed());
    println!("{}", rendered);

    Ok(())
}
