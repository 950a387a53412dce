use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use moviemania_config::{mask_secret, Config, CredentialStore, PathManager};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Omdb { api_key, base_url, timeout_secs } => {
            configure_omdb(api_key, base_url, timeout_secs, output)
        }
    }
}

/// Where the API key in effect comes from
fn api_key_source(credentials: &CredentialStore) -> (&'static str, Option<String>) {
    let from_env = std::env::var("OMDB_API_KEY").ok().filter(|k| !k.trim().is_empty());
    match (from_env, credentials.get_omdb_api_key()) {
        (Some(key), _) => ("environment", Some(key)),
        (None, Some(key)) => ("credentials file", Some(key.clone())),
        (None, None) => ("not set", None),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let (source, api_key) = api_key_source(&credentials);
    let api_key_display = match &api_key {
        Some(key) if full => key.clone(),
        Some(key) => mask_secret(key),
        None => String::new(),
    };

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "data_dir": path_manager.store_dir().display().to_string(),
            "omdb": {
                "base_url": config.omdb.base_url,
                "timeout_secs": config.omdb.timeout_secs,
                "api_key": api_key.as_ref().map(|_| api_key_display.clone()),
                "api_key_source": source,
            },
            "search": { "min_query_length": config.search.min_query_length },
            "storage": { "watched_key": config.storage.watched_key },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("No configuration file at {}, showing defaults", config_file.display()));
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config file"), Cell::new(config_file.display())]);
    table.add_row(vec![Cell::new("Data directory"), Cell::new(path_manager.store_dir().display())]);
    table.add_row(vec![Cell::new("OMDb base URL"), Cell::new(&config.omdb.base_url)]);
    table.add_row(vec![
        Cell::new("Request timeout"),
        Cell::new(
            config
                .omdb
                .timeout_secs
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "none".to_string()),
        ),
    ]);
    table.add_row(vec![
        Cell::new("OMDb API key"),
        Cell::new(match api_key {
            Some(_) => format!("{} ({})", api_key_display, source),
            None => "✗ not set".red().to_string(),
        }),
    ]);
    table.add_row(vec![Cell::new("Minimum query length"), Cell::new(config.search.min_query_length)]);
    table.add_row(vec![Cell::new("Watched list key"), Cell::new(&config.storage.watched_key)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    println!("{}", table);
    Ok(())
}

fn configure_omdb(
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;

    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    if let Some(url) = base_url {
        config.omdb.base_url = url;
    }
    if timeout_secs.is_some() {
        config.omdb.timeout_secs = timeout_secs;
    }
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let api_key = match api_key {
        Some(key) => key,
        None => {
            output.info("Get a free API key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_password("OMDb API key")?
        }
    };
    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    credentials.set_omdb_api_key(api_key.clone());
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config: {}", e))?;

    output.success(format!("OMDb configured ({}, key {})", config.omdb.base_url, mask_secret(&api_key)));
    Ok(())
}
