use std::{env, path::PathBuf};

use persistance::fs::{
    config::{read_config, write_default_config, Config, ConfigError},
    utils::{get_config_location, parse_location},
};

const CONFIG_ENV_VAR: &str = "DIALOGUE_INDEX_CONFIG";

/// `--config` wins over the environment, which wins over the platform config directory.
pub fn config_path(explicit: Option<&str>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(parse_location(path));
    }
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        return Ok(parse_location(&path));
    }
    let (_, file) = get_config_location().ok_or(ConfigError::NoConfigDir)?;
    Ok(file)
}

pub fn load_config(explicit: Option<&str>) -> Result<Config, ConfigError> {
    read_config(&config_path(explicit)?)
}

pub fn init_config(explicit: Option<&str>) -> Result<(PathBuf, bool), ConfigError> {
    let path = config_path(explicit)?;
    let written = write_default_config(&path)?;
    Ok((path, written))
}
