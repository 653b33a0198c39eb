//! Settings commands: show, edit, set

use anyhow::{Context, Result};
use dockview_config::GlobalConfig;
use dockview_engine::{try_resolve_base_url, EngineClient};

/// Show the configuration file, or open it in `$EDITOR`
pub async fn config(client: &EngineClient, edit: bool) -> Result<()> {
    let config_path = GlobalConfig::config_path()?;

    if edit {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

        if !config_path.exists() {
            GlobalConfig::default().save_to(&config_path)?;
            println!("Created default config at {:?}", config_path);
        }

        std::process::Command::new(&editor)
            .arg(&config_path)
            .status()
            .context(format!("Failed to open editor: {}", editor))?;
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("# Config file: {:?}\n", config_path);
        println!("{}", content);
    } else {
        println!("# Config file: {:?} (not created yet)\n", config_path);
        println!("# Default configuration:");
        let content = toml::to_string_pretty(&GlobalConfig::default())?;
        println!("{}", content);
    }

    let settings = client.settings();
    println!("# Engine URL:  {}", settings.engine_url);
    println!("# API version: {}", settings.api_version);
    if try_resolve_base_url(settings).is_some() {
        println!("# Base URL:    {}", client.resolve_base_url());
    } else {
        println!(
            "# Base URL:    {} (configured value is not a usable URL, using default)",
            client.resolve_base_url()
        );
    }

    match client.ping().await {
        Ok(()) => println!("# Engine:      reachable"),
        Err(e) => println!("# Engine:      unreachable ({})", e),
    }

    Ok(())
}

/// Persist connection settings; only the given values change
pub async fn config_set(engine_url: Option<&str>, api_version: Option<&str>) -> Result<()> {
    let config_path = GlobalConfig::config_path()?;
    let mut config = GlobalConfig::load_from(&config_path)?;

    if engine_url.is_none() && api_version.is_none() {
        println!("Nothing to change (pass --engine-url and/or --api-version).");
        return Ok(());
    }

    config.connection.apply(engine_url, api_version);
    config.save_to(&config_path)?;

    println!("Saved connection settings to {:?}", config_path);
    println!("  dockerEngineServer = {:?}", config.connection.engine_url);
    println!("  dockerApiVersion   = {:?}", config.connection.api_version);

    if try_resolve_base_url(&config.connection).is_none() {
        eprintln!(
            "Warning: these settings do not form a usable http(s) URL; requests will go to the default engine."
        );
    }

    Ok(())
}
