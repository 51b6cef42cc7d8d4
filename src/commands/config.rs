use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use daybook_core::daybook_config::DaybookConfig;
use daybook_core::store::EVENTS_KEY;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = DaybookConfig::config_path()?;
    let config = DaybookConfig::load().context("Failed to load config")?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!("  Events:  {}", config.storage().slot_path(EVENTS_KEY).display());

    Ok(())
}

pub fn set_data_dir(dir: PathBuf) -> Result<()> {
    let config_path = DaybookConfig::config_path()?;
    let config = write_data_dir(&config_path, dir)?;

    println!(
        "{} data_dir = {} in {}",
        "Saved".green(),
        config.data_dir.display(),
        config_path.display()
    );

    Ok(())
}

/// Update `data_dir` in the config file at `config_path`, keeping any other
/// settings it holds.
fn write_data_dir(config_path: &Path, dir: PathBuf) -> Result<DaybookConfig> {
    let mut config = DaybookConfig::load_from(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    config.data_dir = dir;
    config.save(config_path)?;
    Ok(config)
}
