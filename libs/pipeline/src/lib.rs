mod context;
mod error;

use log::info;
use persistance::fs::{read_stores, write_stores, StoreLocations};
use preprocessing::{preprocess_dialogue, FrequencyTable, Resources, Vocabulary};
use scripts::{Script, ScriptRepository};

pub use context::RunContext;
pub use error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusState {
    /// At least one script has no processed dialogue yet.
    Unprocessed,
    Processed,
}

impl CorpusState {
    pub fn of(scripts: &[Script]) -> Self {
        if scripts.iter().all(Script::is_processed) {
            CorpusState::Processed
        } else {
            CorpusState::Unprocessed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularySource {
    Recomputed,
    Reloaded,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub vocabulary: Vocabulary,
    pub frequencies: FrequencyTable,
    pub processed_scripts: usize,
    pub source: VocabularySource,
}

/// Runs the preprocessing pipeline once.
///
/// If any script is still unprocessed, those scripts are preprocessed, the vocabulary and
/// frequency table are rebuilt and persisted, and the new processed dialogue is written back.
/// Otherwise both are reloaded from the stores.
pub async fn preprocess_scripts<R>(
    repository: &R,
    resources: &Resources,
    stores: &StoreLocations,
) -> Result<PipelineOutcome, PipelineError>
where
    R: ScriptRepository + ?Sized,
{
    info!("Start preprocessing");
    let scripts = repository.get_all_scripts().await?;
    let outcome = match CorpusState::of(&scripts) {
        CorpusState::Unprocessed => {
            info!("Not all scripts are preprocessed, start preprocessing");
            recompute(repository, resources, stores, scripts).await?
        }
        CorpusState::Processed => {
            info!("Scripts are already preprocessed, loading stored vocabulary");
            reload(stores, scripts.len()).await?
        }
    };
    info!(
        "{} scripts came through preprocessing, vocabulary holds {} tokens",
        outcome.processed_scripts,
        outcome.vocabulary.len()
    );
    Ok(outcome)
}

async fn recompute<R>(
    repository: &R,
    resources: &Resources,
    stores: &StoreLocations,
    scripts: Vec<Script>,
) -> Result<PipelineOutcome, PipelineError>
where
    R: ScriptRepository + ?Sized,
{
    let (processed, unprocessed): (Vec<Script>, Vec<Script>) =
        scripts.into_iter().partition(Script::is_processed);
    info!(
        "{} scripts to preprocess, {} already done",
        unprocessed.len(),
        processed.len()
    );

    let mut context = RunContext::new();
    // already processed scripts still count towards the corpus, they just aren't redone
    for script in &processed {
        context.accumulate(script.processed_tokens().map(str::to_owned).collect());
    }
    let mut updated = Vec::with_capacity(unprocessed.len());
    for mut script in unprocessed {
        let tokens = preprocess_dialogue(&script.dialogue, resources)?;
        script.processed_dialogue = Some(tokens.join(" "));
        context.accumulate(tokens);
        updated.push(script);
    }

    let (vocabulary, frequencies) = context.finish();
    write_stores(stores, &vocabulary, &frequencies)
        .await
        .map_err(PipelineError::PersistenceWrite)?;
    repository.update_scripts(&updated).await?;

    Ok(PipelineOutcome {
        vocabulary,
        frequencies,
        processed_scripts: processed.len() + updated.len(),
        source: VocabularySource::Recomputed,
    })
}

async fn reload(
    stores: &StoreLocations,
    script_count: usize,
) -> Result<PipelineOutcome, PipelineError> {
    let (vocabulary, frequencies) = read_stores(stores)
        .await
        .map_err(PipelineError::PersistenceCorrupt)?;
    Ok(PipelineOutcome {
        vocabulary,
        frequencies,
        processed_scripts: script_count,
        source: VocabularySource::Reloaded,
    })
}
