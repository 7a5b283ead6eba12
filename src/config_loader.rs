use crate::config::Config;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse a topology configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    // Open the configuration file
    let file = File::open(config_path)?;

    // Parse the YAML content
    let config: Config = serde_yaml::from_reader(file)?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

/// Load a configuration and reduce it to the requested profile, if any.
pub fn load_config_with_profile(config_path: &Path, profile: Option<&str>) -> Result<Config> {
    let mut config = load_config(config_path)?;

    if let Some(name) = profile {
        config.select_profile(name)?;
    }

    Ok(config)
}
