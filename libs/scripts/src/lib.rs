pub mod json;
pub mod memory;

use std::{io, path::PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::json::JsonScriptRepository;
pub use self::memory::MemoryScriptRepository;

/// A movie script's dialogue. `processed_dialogue` is `None` until the script has been through
/// preprocessing, after which it is never recomputed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: i64,
    pub dialogue: String,
    #[serde(default)]
    pub processed_dialogue: Option<String>,
}

impl Script {
    pub fn new(id: i64, dialogue: impl Into<String>) -> Self {
        Self {
            id,
            dialogue: dialogue.into(),
            processed_dialogue: None,
        }
    }

    pub fn is_processed(&self) -> bool {
        self.processed_dialogue.is_some()
    }

    /// Tokens of an already processed script, empty if it was never processed.
    pub fn processed_tokens(&self) -> impl Iterator<Item = &str> {
        self.processed_dialogue
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
    }
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("could not read scripts from {path:?}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write scripts to {path:?}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not decode scripts: {0}")]
    DeserializationError(#[from] serde_json::Error),
    #[error("{0}")]
    Unavailable(String),
}

/// Storage backend for scripts.
#[async_trait]
pub trait ScriptRepository: Send + Sync {
    async fn get_all_scripts(&self) -> Result<Vec<Script>, RepositoryError>;
    /// Persists `processed_dialogue` for each given script. Writing the same script twice
    /// leaves the store as if it had been written once.
    async fn update_scripts(&self, scripts: &[Script]) -> Result<(), RepositoryError>;
}
