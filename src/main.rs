use dotenv::dotenv;
use std::env;
use std::path::Path;
use std::process::ExitCode;

use joke_markov::logging::init_tracing;
use joke_markov::{ChainGenerator, Joke, Options, Result, SqliteStore, STORED_JOKES};

fn main() -> ExitCode {
    // Load the environment variables
    dotenv().ok();
    init_tracing();

    let count = match env::args().nth(1) {
        Some(arg) => match arg.parse::<usize>() {
            Ok(count) => count,
            Err(_) => {
                eprintln!("Usage: joke-markov [COUNT]");
                return ExitCode::FAILURE;
            }
        },
        None => 1,
    };

    match run(count) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(count: usize) -> Result<()> {
    let config_path = env::var("MARKOV_CONFIG").unwrap_or_else(|_| String::from("markov.toml"));
    let options = Options::load(&config_path)?;

    let store = SqliteStore::open(&options.database_path)?;
    let jokes = match store.get(STORED_JOKES)? {
        Some(jokes) => jokes,
        None => load_seed_corpus(&options.corpus_path)?,
    };
    tracing::info!(jokes = jokes.len(), "loaded corpus");

    let mut generator = ChainGenerator::new(jokes, store, options);
    for _ in 0..count {
        let joke = generator.generate_joke()?;
        println!("{joke}");
    }

    Ok(())
}

fn load_seed_corpus(path: &Path) -> Result<Vec<Joke>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "no seed corpus found, starting empty");
        return Ok(Vec::new());
    }

    let source = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}
