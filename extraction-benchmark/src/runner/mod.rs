//! Benchmark execution engine

pub mod progress;
pub mod scoring;
pub mod scraping;

pub use progress::{ConsoleProgress, NoOpProgress, ProgressCallback};
pub use scoring::{write_score_tables, ScoreRunner, ScorerOutcome, SCORE_INDEX};
pub use scraping::{scrape_articles, ScrapeRunner};

use eval_core::ScoreError;

use crate::config::ConfigError;
use crate::dataset::LoadError;
use crate::extractors::ExtractError;

/// Errors that abort a benchmark run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("scraper '{scraper}' failed on {article}: {source}")]
    Scrape {
        scraper: String,
        article: String,
        #[source]
        source: ExtractError,
    },
}
