use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{RepositoryError, Script, ScriptRepository};

/// Keeps scripts in process. Every batch passed to `update_scripts` is remembered so callers can
/// check what was written back.
#[derive(Debug, Default)]
pub struct MemoryScriptRepository {
    scripts: Mutex<Vec<Script>>,
    updates: Mutex<Vec<Vec<i64>>>,
}

impl MemoryScriptRepository {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub async fn scripts(&self) -> Vec<Script> {
        self.scripts.lock().await.clone()
    }

    /// Ids written by each `update_scripts` call, in call order.
    pub async fn updates(&self) -> Vec<Vec<i64>> {
        self.updates.lock().await.clone()
    }
}

#[async_trait]
impl ScriptRepository for MemoryScriptRepository {
    async fn get_all_scripts(&self) -> Result<Vec<Script>, RepositoryError> {
        Ok(self.scripts().await)
    }

    async fn update_scripts(&self, scripts: &[Script]) -> Result<(), RepositoryError> {
        let mut stored = self.scripts.lock().await;
        if let Some(missing) = scripts
            .iter()
            .find(|update| !stored.iter().any(|s| s.id == update.id))
        {
            return Err(RepositoryError::Unavailable(format!(
                "script {} is not stored",
                missing.id
            )));
        }
        for update in scripts {
            if let Some(script) = stored.iter_mut().find(|s| s.id == update.id) {
                script.processed_dialogue = update.processed_dialogue.clone();
            }
        }
        self.updates
            .lock()
            .await
            .push(scripts.iter().map(|s| s.id).collect());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_updates() {
        let repository = MemoryScriptRepository::new(vec![Script::new(1, "a"), Script::new(2, "b")]);
        let mut update = Script::new(2, "b");
        update.processed_dialogue = Some(String::new());
        repository.update_scripts(&[update]).await.unwrap();

        assert_eq!(repository.updates().await, vec![vec![2]]);
        let scripts = repository.get_all_scripts().await.unwrap();
        assert!(!scripts[0].is_processed());
        assert!(scripts[1].is_processed());
    }
}
