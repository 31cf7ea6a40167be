//! `config`: print the effective configuration

use anyhow::{Context, Result};

use crate::config::{Config, ENV_ACCESS_TOKEN};

pub fn handle_config_command(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{}", rendered.trim_end());

    let token_state = if config.access_token().is_ok() {
        "set"
    } else {
        "not set"
    };
    println!();
    println!("# access token ({}): {}", ENV_ACCESS_TOKEN, token_state);
    if let Some(path) = Config::default_path() {
        println!("# config file: {}", path.display());
    }
    Ok(())
}
