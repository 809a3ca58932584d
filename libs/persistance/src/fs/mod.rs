pub mod config;
pub mod utils;

use std::{
    io,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Writer};
use log::debug;
use preprocessing::{FrequencyTable, Vocabulary};
use thiserror::Error;
use tokio::fs::{self, read_to_string};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store {0:?} does not exist")]
    Missing(PathBuf),
    #[error("could not access store {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("{path:?} line {line}: malformed record {record:?}")]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        record: String,
    },
    #[error("vocabulary token {token:?} has no entry in {frequencies:?}")]
    UnknownToken { token: String, frequencies: PathBuf },
}

/// Where the vocabulary and the frequency table live on disk. They are always written and read
/// as a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocations {
    pub vocabulary: PathBuf,
    pub frequencies: PathBuf,
}

pub async fn write_stores(
    locations: &StoreLocations,
    vocabulary: &Vocabulary,
    frequencies: &FrequencyTable,
) -> Result<(), StoreError> {
    write_vocabulary(&locations.vocabulary, vocabulary).await?;
    write_frequencies(&locations.frequencies, frequencies).await?;
    Ok(())
}

/// Reads both stores back. The hapax filter is applied again before the vocabulary is handed
/// out, so what comes back matches a fresh computation over the same corpus.
///
/// A vocabulary token the frequency store knows nothing about means the pair does not belong
/// together, and the read fails.
pub async fn read_stores(
    locations: &StoreLocations,
) -> Result<(Vocabulary, FrequencyTable), StoreError> {
    let tokens = read_vocabulary(&locations.vocabulary).await?;
    let frequencies = read_frequencies(&locations.frequencies).await?;
    if let Some(token) = tokens.iter().find(|t| frequencies.get(t).is_none()) {
        return Err(StoreError::UnknownToken {
            token: token.to_owned(),
            frequencies: locations.frequencies.clone(),
        });
    }
    let vocabulary = Vocabulary::build(tokens, &frequencies);
    Ok((vocabulary, frequencies))
}

/// The whole vocabulary goes on a single record.
pub async fn write_vocabulary(path: &Path, vocabulary: &Vocabulary) -> Result<(), StoreError> {
    let mut writer = Writer::from_writer(vec![]);
    // csv writes an empty record as `""`, an empty vocabulary is an empty file instead
    if !vocabulary.is_empty() {
        writer
            .write_record(vocabulary.iter())
            .map_err(|e| csv_error(path, e))?;
    }
    write_store(path, into_bytes(path, writer)?).await
}

pub async fn read_vocabulary(path: &Path) -> Result<Vec<String>, StoreError> {
    let contents = read_store(path).await?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());
    let mut tokens = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        tokens.extend(record.iter().filter(|f| !f.is_empty()).map(str::to_owned));
    }
    Ok(tokens)
}

/// One `token,count` record per line.
pub async fn write_frequencies(path: &Path, frequencies: &FrequencyTable) -> Result<(), StoreError> {
    let mut writer = Writer::from_writer(vec![]);
    for (token, count) in frequencies {
        writer
            .write_record([token.as_str(), count.to_string().as_str()])
            .map_err(|e| csv_error(path, e))?;
    }
    write_store(path, into_bytes(path, writer)?).await
}

pub async fn read_frequencies(path: &Path) -> Result<FrequencyTable, StoreError> {
    let contents = read_store(path).await?;
    // flexible so a short or long record is reported against its line instead of as a csv error
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());
    let mut frequencies = FrequencyTable::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let entry = match (record.len(), record.get(0), record.get(1)) {
            (2, Some(token), Some(count)) if !token.is_empty() => count
                .parse::<u64>()
                .map(|count| (token.to_owned(), count))
                .ok(),
            _ => None,
        };
        match entry {
            Some((token, count)) => frequencies.insert(token, count),
            None => return Err(malformed(path, &record)),
        }
    }
    Ok(frequencies)
}

fn malformed(path: &Path, record: &StringRecord) -> StoreError {
    StoreError::MalformedRecord {
        path: path.to_owned(),
        line: record.position().map(|p| p.line()).unwrap_or_default(),
        record: record.iter().collect::<Vec<&str>>().join(","),
    }
}

fn csv_error(path: &Path, error: csv::Error) -> StoreError {
    let line = error.position().map(|p| p.line()).unwrap_or_default();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => StoreError::Io {
            path: path.to_owned(),
            source,
        },
        kind => StoreError::MalformedRecord {
            path: path.to_owned(),
            line,
            record: format!("{:?}", kind),
        },
    }
}

fn into_bytes(path: &Path, writer: Writer<Vec<u8>>) -> Result<Vec<u8>, StoreError> {
    writer.into_inner().map_err(|e| StoreError::Io {
        path: path.to_owned(),
        source: e.into_error(),
    })
}

async fn read_store(path: &Path) -> Result<String, StoreError> {
    match read_to_string(path).await {
        Ok(contents) => Ok(contents),
        Err(e) => match e.kind() {
            io::ErrorKind::NotFound => Err(StoreError::Missing(path.to_owned())),
            _ => Err(StoreError::Io {
                path: path.to_owned(),
                source: e,
            }),
        },
    }
}

async fn write_store(path: &Path, contents: Vec<u8>) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_owned(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
    }
    fs::write(path, contents).await.map_err(io_err)?;
    debug!("Wrote store {:?}", path);
    Ok(())
}
