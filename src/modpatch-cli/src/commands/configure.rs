//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up modpatch defaults.

use crate::cli::OptionArgs;
use crate::config::Config;
use anyhow::Result;

/// Handle the configure command
///
/// # Arguments
/// * `settings` - Values to store; unset fields keep their current value
/// * `show` - If true, show current configuration
pub fn handle(settings: OptionArgs, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if let Some(palette) = settings.palette.as_deref() {
        modpatch::palette(palette)?;
    }

    if config.update(settings) {
        let path = config.save()?;
        show_config(&config);
        println!("Config saved to: {}", path.display());
    } else {
        show_usage();
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    for line in describe(config) {
        println!("{}", line);
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

fn describe(config: &Config) -> Vec<String> {
    let or_default = |value: Option<String>, default: &str| {
        value.unwrap_or_else(|| format!("{} (default)", default))
    };
    let defaults = modpatch::PatchOptions::default();

    vec![
        format!(
            "Currency name: {}",
            or_default(config.currency_name.clone(), &defaults.currency_name)
        ),
        format!(
            "Assets dir: {}",
            or_default(
                config.assets_dir.as_ref().map(|p| p.display().to_string()),
                "none"
            )
        ),
        format!(
            "Palette: {}",
            or_default(config.palette.clone(), &defaults.palette)
        ),
        format!(
            "Cache dir: {}",
            or_default(
                config.cache_dir.as_ref().map(|p| p.display().to_string()),
                "user cache directory"
            )
        ),
    ]
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: modpatch configure [--currency-name NAME] [--assets-dir DIR]");
    println!("                          [--palette v2..v7] [--cache-dir DIR]");
    println!("   or: modpatch configure --show");
    println!();
    println!("Note: the assets directory may hold projecte/transmute.png (GUI texture)");
    println!("      and projecte/remain_i18n.json (extra zh_cn translations).");
}
