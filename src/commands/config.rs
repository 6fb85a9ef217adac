//! Config subcommands handler

use anyhow::{bail, Result};

use readalong::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{}", toml_str);
    Ok(())
}

/// Print where the configuration file lives.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    let config_path = Config::config_path()?;
    let note = if config_path.exists() {
        ""
    } else {
        " (not created yet)"
    };
    println!("{}{}", config_path.display(), note);
    Ok(())
}

/// Write the default configuration.
///
/// Refuses to replace an existing file unless `force` is set.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    Config::default().save_to(&config_path)?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}
