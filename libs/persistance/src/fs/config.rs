use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    utils::{get_data_dir_location, parse_location},
    StoreLocations,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
    #[error("could not read config at {path:?}: {source}")]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("could not parse config at {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not write config at {path:?}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("`stores.{0}` must point at a file")]
    MissingStorePath(&'static str),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Stores {
    #[serde(default)]
    pub vocabulary_path: String,
    #[serde(default)]
    pub frequency_path: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    pub words_path: String,
    pub stopwords_path: Option<String>,
    pub exceptions_path: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Scripts {
    pub location: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub stores: Stores,
    pub resources: Resources,
    pub scripts: Scripts,
}

impl Config {
    pub fn store_locations(&self) -> Result<StoreLocations, ConfigError> {
        if self.stores.vocabulary_path.trim().is_empty() {
            return Err(ConfigError::MissingStorePath("vocabulary_path"));
        }
        if self.stores.frequency_path.trim().is_empty() {
            return Err(ConfigError::MissingStorePath("frequency_path"));
        }
        Ok(StoreLocations {
            vocabulary: parse_location(&self.stores.vocabulary_path),
            frequencies: parse_location(&self.stores.frequency_path),
        })
    }

    pub fn words_location(&self) -> PathBuf {
        parse_location(&self.resources.words_path)
    }

    pub fn stopwords_location(&self) -> Option<PathBuf> {
        self.resources.stopwords_path.as_deref().map(parse_location)
    }

    pub fn exceptions_location(&self) -> Option<PathBuf> {
        self.resources.exceptions_path.as_deref().map(parse_location)
    }

    pub fn scripts_location(&self) -> PathBuf {
        parse_location(&self.scripts.location)
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = get_data_dir_location().unwrap_or_else(|| PathBuf::from("."));
        let in_data_dir = |name: &str| data_dir.join(name).to_string_lossy().into_owned();
        Config {
            stores: Stores {
                vocabulary_path: in_data_dir("vocabulary.csv"),
                frequency_path: in_data_dir("term_frequency.csv"),
            },
            resources: Resources {
                words_path: "/usr/share/dict/words".into(),
                stopwords_path: None,
                exceptions_path: None,
            },
            scripts: Scripts {
                location: in_data_dir("scripts.json"),
            },
        }
    }
}

pub fn parse_config(contents: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Invalid {
        path: path.to_owned(),
        source,
    })
}

pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_owned(),
        source,
    })?;
    parse_config(&contents, path)
}

/// Writes the default config unless a file is already there. Returns whether a file was written.
pub fn write_default_config(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    let write_err = |source| ConfigError::WriteError {
        path: path.to_owned(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    let default_conf = toml::to_string(&Config::default())?;
    fs::write(path, default_conf).map_err(write_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[stores]
vocabulary_path = "/var/lib/index/vocabulary.csv"
frequency_path = "/var/lib/index/term_frequency.csv"

[resources]
words_path = "/usr/share/dict/words"
stopwords_path = "/etc/index/stopwords.txt"

[scripts]
location = "/var/lib/index/scripts.json"
"#;

    #[test]
    fn parses_config() {
        let config = parse_config(SAMPLE, Path::new("config.toml")).unwrap();
        let stores = config.store_locations().unwrap();
        assert_eq!(
            stores.vocabulary,
            PathBuf::from("/var/lib/index/vocabulary.csv")
        );
        assert_eq!(
            stores.frequencies,
            PathBuf::from("/var/lib/index/term_frequency.csv")
        );
        assert_eq!(
            config.stopwords_location(),
            Some(PathBuf::from("/etc/index/stopwords.txt"))
        );
        assert_eq!(config.exceptions_location(), None);
    }

    #[test]
    fn missing_store_paths_are_a_config_error() {
        let without_stores = SAMPLE.replace(
            "vocabulary_path = \"/var/lib/index/vocabulary.csv\"\n",
            "",
        );
        let config = parse_config(&without_stores, Path::new("config.toml")).unwrap();
        assert!(matches!(
            config.store_locations(),
            Err(ConfigError::MissingStorePath("vocabulary_path"))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_config("stores = 3", Path::new("config.toml")),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn default_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");
        assert!(write_default_config(&path).unwrap());
        assert!(!write_default_config(&path).unwrap());
        let config = read_config(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.store_locations().is_ok());
    }
}
