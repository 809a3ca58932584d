use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use log::debug;
use tokio::{
    fs::{self, read_to_string},
    sync::Mutex,
};

use crate::{RepositoryError, Script, ScriptRepository};

/// Scripts kept in a single JSON array on disk.
#[derive(Debug)]
pub struct JsonScriptRepository {
    location: PathBuf,
    // serializes the read-modify-write in `update_scripts`
    write_lock: Mutex<()>,
}

impl JsonScriptRepository {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    async fn read(&self) -> Result<Vec<Script>, RepositoryError> {
        let contents = read_to_string(&self.location)
            .await
            .map_err(|source| RepositoryError::ReadError {
                path: self.location.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn write(&self, scripts: &[Script]) -> Result<(), RepositoryError> {
        let contents = serde_json::to_string_pretty(scripts)?;
        fs::write(&self.location, contents)
            .await
            .map_err(|source| RepositoryError::WriteError {
                path: self.location.clone(),
                source,
            })
    }
}

#[async_trait]
impl ScriptRepository for JsonScriptRepository {
    async fn get_all_scripts(&self) -> Result<Vec<Script>, RepositoryError> {
        self.read().await
    }

    async fn update_scripts(&self, scripts: &[Script]) -> Result<(), RepositoryError> {
        if scripts.is_empty() {
            return Ok(());
        }
        let _guard = self.write_lock.lock().await;
        let mut stored = self.read().await?;
        let updates = scripts
            .iter()
            .map(|s| (s.id, s.processed_dialogue.clone()))
            .collect::<HashMap<i64, Option<String>>>();
        let mut matched = 0;
        for script in stored.iter_mut() {
            if let Some(processed) = updates.get(&script.id) {
                script.processed_dialogue = processed.clone();
                matched += 1;
            }
        }
        if matched < updates.len() {
            return Err(RepositoryError::WriteError {
                path: self.location.clone(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} of the updated scripts are not stored", updates.len() - matched),
                ),
            });
        }
        self.write(&stored).await?;
        debug!("Updated {} scripts in {:?}", matched, self.location);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repository_with(scripts: &[Script]) -> (tempfile::TempDir, JsonScriptRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonScriptRepository::new(dir.path().join("scripts.json"));
        repository.write(scripts).await.unwrap();
        (dir, repository)
    }

    #[tokio::test]
    async fn reads_scripts() {
        let (_dir, repository) =
            repository_with(&[Script::new(1, "First"), Script::new(2, "Second")]).await;
        let scripts = repository.get_all_scripts().await.unwrap();
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[1].dialogue, "Second");
    }

    #[tokio::test]
    async fn updates_only_processed_dialogue() {
        let (_dir, repository) =
            repository_with(&[Script::new(1, "First"), Script::new(2, "Second")]).await;
        let mut update = Script::new(2, "ignored");
        update.processed_dialogue = Some("second".into());

        repository.update_scripts(&[update.clone()]).await.unwrap();
        repository.update_scripts(&[update]).await.unwrap();

        let scripts = repository.get_all_scripts().await.unwrap();
        assert_eq!(scripts[0], Script::new(1, "First"));
        assert_eq!(scripts[1].dialogue, "Second");
        assert_eq!(scripts[1].processed_dialogue.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn unknown_ids_fail_the_update() {
        let (_dir, repository) = repository_with(&[Script::new(1, "First")]).await;
        let mut update = Script::new(9, "Nobody");
        update.processed_dialogue = Some("nobody".into());
        assert!(matches!(
            repository.update_scripts(&[update]).await,
            Err(RepositoryError::WriteError { .. })
        ));
        assert!(!repository.get_all_scripts().await.unwrap()[0].is_processed());
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let repository = JsonScriptRepository::new("/nonexistent/scripts.json");
        assert!(matches!(
            repository.get_all_scripts().await,
            Err(RepositoryError::ReadError { .. })
        ));
    }
}
