use directories::{ProjectDirs, UserDirs};
use std::path::PathBuf;

const APP_NAME: &str = "dialogue-index";

pub fn get_data_dir_location() -> Option<PathBuf> {
    let project_dir = ProjectDirs::from("", "", APP_NAME)?;
    Some(project_dir.data_dir().to_owned())
}

pub fn get_config_location() -> Option<(PathBuf, PathBuf)> {
    let project_dir = ProjectDirs::from("", "", APP_NAME)?;
    let config_dir = project_dir.config_dir();
    let mut config_path = PathBuf::from(config_dir);
    config_path.push("config.toml");
    Some((config_dir.to_owned(), config_path))
}

/// Expands `~` to the user's home directory.
pub fn parse_location(location: &str) -> PathBuf {
    if !location.contains('~') {
        return PathBuf::from(location);
    }
    let home_dir: String = match UserDirs::new() {
        Some(dirs) => dirs.home_dir().to_string_lossy().into(),
        None => std::env::var("HOME").unwrap_or_default(),
    };
    PathBuf::from(location.replace('~', &home_dir))
}
