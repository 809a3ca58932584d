mod config;

use std::{process::exit, time::Instant};

use log::{error, info};
use persistance::fs::config::Config;
use pipeline::{preprocess_scripts, PipelineError, PipelineOutcome, VocabularySource};
use preprocessing::Resources;
use scripts::JsonScriptRepository;

use crate::config::{init_config, load_config};

#[tokio::main]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut config_arg: Option<String> = None;
    let mut init = false;
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--version" => return print_version(),
            "-h" | "--help" => return print_help(),
            "-i" | "--init" => init = true,
            "-c" | "--config" => match args.next() {
                Some(path) => config_arg = Some(path.to_owned()),
                None => {
                    eprintln!("{} expects a path", arg);
                    exit(1);
                }
            },
            _ => {
                eprintln!("unknown option: {}", arg);
                exit(1);
            }
        }
    }

    if init {
        match init_config(config_arg.as_deref()) {
            Ok((path, true)) => println!("Wrote default config to {:?}", path),
            Ok((path, false)) => println!("Config already exists at {:?}", path),
            Err(e) => {
                error!("{}", e);
                exit(1);
            }
        }
        return;
    }

    let now = Instant::now();
    match run(config_arg.as_deref()).await {
        Ok(outcome) => print_summary(&outcome, now.elapsed().as_millis()),
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    }
}

async fn run(config_arg: Option<&str>) -> Result<PipelineOutcome, PipelineError> {
    let config = load_config(config_arg)?;
    let stores = config.store_locations()?;
    let resources = load_resources(&config)?;
    let repository = JsonScriptRepository::new(config.scripts_location());
    info!("Reading scripts from {:?}", repository.location());
    preprocess_scripts(&repository, &resources, &stores).await
}

fn load_resources(config: &Config) -> Result<Resources, PipelineError> {
    let stopwords = config.stopwords_location();
    let exceptions = config.exceptions_location();
    let resources = Resources::load(
        &config.words_location(),
        stopwords.as_deref(),
        exceptions.as_deref(),
    )?;
    Ok(resources)
}

fn print_summary(outcome: &PipelineOutcome, elapsed_ms: u128) {
    let how = match outcome.source {
        VocabularySource::Recomputed => "computed",
        VocabularySource::Reloaded => "reloaded",
    };
    println!(
        "Vocabulary {} in {}ms: {} scripts, {} vocabulary tokens, {} distinct terms",
        how,
        elapsed_ms,
        outcome.processed_scripts,
        outcome.vocabulary.len(),
        outcome.frequencies.len()
    );
}

fn print_version() {
    println!("dialogue-index v{}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    print!(
        "Usage: dialogue-index [options]
        Options:
        -i, --init                   Write a default config file
        -c, --config <path>          Use config at <path>
        -v, --version                Print version.
        -h, --help                   Show this message.

        Without options, preprocesses every unprocessed script and rebuilds the vocabulary,
        or reloads the stored vocabulary when every script is already processed.
        Config is read from $DIALOGUE_INDEX_CONFIG or the platform config directory.
        "
    );
}
