//! Config command handlers.

use anyhow::{Context, Result};
use edutrackr_core::config::{Config, paths};

/// Prints the resolved configuration with the API key redacted.
pub fn show(config: &Config) -> Result<()> {
    let mut redacted = config.clone();
    if redacted.providers.gemini.api_key.is_some() {
        redacted.providers.gemini.api_key = Some("<redacted>".to_string());
    }
    let rendered = toml::to_string_pretty(&redacted).context("serialize config")?;
    print!("{rendered}");
    Ok(())
}

/// Prints the config file path.
pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}
