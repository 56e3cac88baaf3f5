use anyhow::Result;
use std::path::Path;

use crate::config::Config;

pub fn show_config(path: &Path) -> Result<()> {
    let config = Config::load_from(path)?;
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration ({})", path.display());
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Configuration file already exists at: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(path)?;

    println!("✓ Configuration initialized at: {}", path.display());
    Ok(())
}
