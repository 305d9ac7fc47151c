use anyhow::Result;
use calitask_core::CalitaskConfig;
use log::info;
use owo_colors::OwoColorize;

/// Show the config file, creating it on first use. `api_url` is saved when given.
pub fn run(api_url: Option<String>) -> Result<()> {
    let config_path = CalitaskConfig::config_path()?;

    if !config_path.exists() {
        CalitaskConfig::create_default_config(&config_path)?;
        info!("Created {}", config_path.display());
    }

    let mut config = CalitaskConfig::load_from(&config_path)?;

    if let Some(url) = api_url {
        config.api_url = url;
        config.save_to(&config_path)?;
        info!("Saved api_url to {}", config_path.display());
    }

    println!("{}", "Paths".bold());
    println!("  Config:          {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  API URL:         {}", config.api_url);
    println!("  Default project: {}", config.default_project_id);
    println!("  Untitled events: {}", config.untitled_title);

    Ok(())
}
