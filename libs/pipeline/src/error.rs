use persistance::fs::{config::ConfigError, StoreError};
use preprocessing::{NormalizeError, ResourceError};
use scripts::RepositoryError;
use thiserror::Error;

/// Which stage of a run failed. Any of these aborts the run and no vocabulary is produced.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("language resources unavailable: {0}")]
    ResourceUnavailable(#[from] ResourceError),
    #[error("script repository failed: {0}")]
    Repository(#[from] RepositoryError),
    #[error("stored vocabulary is unusable: {0}")]
    PersistenceCorrupt(StoreError),
    #[error("could not persist vocabulary: {0}")]
    PersistenceWrite(StoreError),
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<NormalizeError> for PipelineError {
    fn from(e: NormalizeError) -> Self {
        PipelineError::Configuration(e.to_string())
    }
}

impl From<ConfigError> for PipelineError {
    fn from(e: ConfigError) -> Self {
        PipelineError::Configuration(e.to_string())
    }
}
