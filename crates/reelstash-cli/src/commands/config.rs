use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Input, Password};
use movie_explorer_config::{Config, PathManager};
use serde_json::json;

use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;

pub fn run(paths: &PathManager, out: &Output, cmd: Option<ConfigCommands>) -> Result<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => show(paths, out),
        ConfigCommands::Init => init(paths, out),
    }
}

fn show(paths: &PathManager, out: &Output) -> Result<()> {
    let config = Config::load(paths).map_err(|e| eyre!("{}", e))?;
    let api_key = config
        .catalog
        .api_key
        .as_deref()
        .map(mask)
        .unwrap_or_else(|| "(not set)".to_string());

    match out.format() {
        OutputFormat::Human => {
            out.info(format!("Config file:  {}", paths.config_file().display()));
            out.info(format!("API key:      {}", api_key));
            out.info(format!("Base URL:     {}", config.catalog.base_url));
            out.info(format!("Debounce:     {}ms", config.search.debounce_ms));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            out.print_json(&json!({
                "config_file": paths.config_file().display().to_string(),
                "api_key": api_key,
                "base_url": config.catalog.base_url,
                "debounce_ms": config.search.debounce_ms,
            }));
        }
    }
    Ok(())
}

fn init(paths: &PathManager, out: &Output) -> Result<()> {
    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    let mut config =
        Config::from_file(&paths.config_file()).map_err(|e| eyre!("{}", e))?;

    let api_key: String = Password::new()
        .with_prompt("OMDb API key")
        .interact()
        .map_err(|e| eyre!("Failed to read API key: {}", e))?;
    if api_key.trim().is_empty() {
        return Err(eyre!("An API key is required"));
    }
    config.catalog.api_key = Some(api_key.trim().to_string());

    let base_url: String = Input::new()
        .with_prompt("Catalog base URL")
        .default(config.catalog.base_url.clone())
        .interact_text()
        .map_err(|e| eyre!("Failed to read base URL: {}", e))?;
    config.catalog.base_url = base_url;

    config
        .save(&paths.config_file())
        .map_err(|e| eyre!("{}", e))?;
    out.success(format!("Wrote {}", paths.config_file().display()));
    Ok(())
}

fn mask(key: &str) -> String {
    let prefix: String = key.chars().take(2).collect();
    format!("{}{}", prefix, "*".repeat(key.chars().count().saturating_sub(2).min(8)))
}
